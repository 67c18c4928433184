#[macro_use]
mod macros;

/// First value in the range formed by the "small integer" Op# opcodes
pub const OP_SMALL_INT_MIN_VAL: u8 = 1;
/// Last value in the range formed by the "small integer" Op# opcodes
pub const OP_SMALL_INT_MAX_VAL: u8 = 16;
/// First value in the range formed by OpData# opcodes (where opcode == value)
pub const OP_DATA_MIN_VAL: u8 = self::codes::OpData1;
/// Last value in the range formed by OpData# opcodes (where opcode == value)
pub const OP_DATA_MAX_VAL: u8 = self::codes::OpData75;
/// Value of the single byte which is encoded by Op1Negate
pub const OP_1_NEGATE_VAL: u8 = 0x81;

opcode_list! {
    // Data push opcodes.
    opcode |Op0| OpFalse<0x00>
    opcode OpData1<0x01>
    opcode OpData32<0x20>
    opcode OpData33<0x21>
    opcode OpData65<0x41>
    opcode OpData75<0x4b>
    opcode OpPushData1<0x4c>
    opcode OpPushData2<0x4d>
    opcode OpPushData4<0x4e>
    opcode Op1Negate<0x4f>
    opcode |Op1| OpTrue<0x51>
    opcode Op2<0x52>
    opcode Op3<0x53>
    opcode Op16<0x60>

    // Control opcodes.
    opcode OpIf<0x63>
    opcode OpElse<0x67>
    opcode OpEndIf<0x68>

    // Bitwise logic opcodes.
    opcode OpEqual<0x87>

    // Crypto opcodes.
    opcode OpBlake2b<0xaa>
    opcode OpCheckSigECDSA<0xab>
    opcode OpCheckSig<0xac>
}

/// Returns true if `opcode` pushes data (or a small integer) rather than acting on the stack.
pub fn is_push_opcode(opcode: u8) -> bool {
    opcode <= codes::Op16
}

use crate::{
    MAX_SCRIPT_ELEMENT_SIZE, MAX_SCRIPTS_SIZE,
    opcodes::{OP_1_NEGATE_VAL, OP_DATA_MAX_VAL, OP_DATA_MIN_VAL, OP_SMALL_INT_MAX_VAL, codes::*, opcode_name},
};
use thiserror::Error;

/// Redeem scripts carrying an inscription envelope are the largest scripts built here.
const DEFAULT_SCRIPT_ALLOC: usize = 512;

#[derive(Error, PartialEq, Eq, Debug, Clone, Copy)]
pub enum ScriptBuilderError {
    #[error("adding opcode {} would exceed the maximum script length of {MAX_SCRIPTS_SIZE}", opcode_label(.0))]
    OpCodeRejected(u8),

    #[error("adding {0} bytes of data would exceed the maximum script length of {MAX_SCRIPTS_SIZE}")]
    DataRejected(usize),

    #[error("a data element of {0} bytes exceeds the maximum element size of {MAX_SCRIPT_ELEMENT_SIZE}")]
    ElementExceedsMaxSize(usize),
}

fn opcode_label(opcode: &u8) -> String {
    opcode_name(*opcode).map(str::to_string).unwrap_or_else(|| format!("{opcode:#04x}"))
}

pub type ScriptBuilderResult<T> = std::result::Result<T, ScriptBuilderError>;

/// Appends opcodes and minimally encoded data pushes to a script.
///
/// Pushes that would break the script engine limits are refused and leave the
/// script unchanged. Whether the script executes successfully is not checked.
///
/// ```
/// use kasforge_txscript::opcodes::codes::*;
/// use kasforge_txscript::script_builder::{ScriptBuilderResult, ScriptBuilder};
/// fn build_p2pk_script(x_only_pub_key: &[u8; 32]) -> ScriptBuilderResult<Vec<u8>> {
///     Ok(ScriptBuilder::new().add_data(x_only_pub_key)?.add_op(OpCheckSig)?.drain())
/// }
/// ```
pub struct ScriptBuilder {
    script: Vec<u8>,
}

/// How a data element is pushed: as a single small-integer opcode, or as a
/// length prefix followed by the data itself.
enum Push {
    Opcode(u8),
    Prefixed(Vec<u8>),
}

impl Push {
    fn for_data(data: &[u8]) -> Self {
        match data {
            [] | [0] => Push::Opcode(Op0),
            [n] if *n <= OP_SMALL_INT_MAX_VAL => Push::Opcode(Op1 - 1 + n),
            [n] if *n == OP_1_NEGATE_VAL => Push::Opcode(Op1Negate),
            _ => {
                let len = data.len();
                let prefix = if len <= OP_DATA_MAX_VAL as usize {
                    vec![OP_DATA_MIN_VAL - 1 + len as u8]
                } else if len <= u8::MAX as usize {
                    vec![OpPushData1, len as u8]
                } else if len <= u16::MAX as usize {
                    [&[OpPushData2][..], &(len as u16).to_le_bytes()].concat()
                } else {
                    [&[OpPushData4][..], &(len as u32).to_le_bytes()].concat()
                };
                Push::Prefixed(prefix)
            }
        }
    }

    fn encoded_len(&self, data: &[u8]) -> usize {
        match self {
            Push::Opcode(_) => 1,
            Push::Prefixed(prefix) => prefix.len() + data.len(),
        }
    }
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self { script: Vec::with_capacity(DEFAULT_SCRIPT_ALLOC) }
    }

    pub fn script(&self) -> &[u8] {
        &self.script
    }

    /// Takes the script out, leaving the builder empty.
    pub fn drain(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.script)
    }

    pub fn add_op(&mut self, opcode: u8) -> ScriptBuilderResult<&mut Self> {
        if self.script.len() >= MAX_SCRIPTS_SIZE {
            return Err(ScriptBuilderError::OpCodeRejected(opcode));
        }
        self.script.push(opcode);
        Ok(self)
    }

    /// Pushes `data` with the shortest encoding for its length. Empty data and
    /// single bytes representable by a small-integer opcode become that opcode.
    pub fn add_data(&mut self, data: &[u8]) -> ScriptBuilderResult<&mut Self> {
        if data.len() > MAX_SCRIPT_ELEMENT_SIZE {
            return Err(ScriptBuilderError::ElementExceedsMaxSize(data.len()));
        }

        let push = Push::for_data(data);
        let encoded_len = push.encoded_len(data);
        if self.script.len() + encoded_len > MAX_SCRIPTS_SIZE {
            return Err(ScriptBuilderError::DataRejected(encoded_len));
        }

        match push {
            Push::Opcode(opcode) => self.script.push(opcode),
            Push::Prefixed(prefix) => {
                self.script.extend_from_slice(&prefix);
                self.script.extend_from_slice(data);
            }
        }
        Ok(self)
    }
}

impl Default for ScriptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_data_encoding() {
        struct Test {
            name: &'static str,
            data: Vec<u8>,
            prefix: Vec<u8>,
            payload: bool,
        }

        let tests = vec![
            Test { name: "empty metadata field", data: vec![], prefix: vec![Op0], payload: false },
            Test { name: "zero byte", data: vec![0x00], prefix: vec![Op0], payload: false },
            Test { name: "small integer", data: vec![0x10], prefix: vec![Op16], payload: false },
            Test { name: "negative one", data: vec![0x81], prefix: vec![Op1Negate], payload: false },
            Test { name: "byte above small integers", data: vec![0x11], prefix: vec![OpData1], payload: true },
            Test { name: "protocol tag", data: b"kasplex".to_vec(), prefix: vec![0x07], payload: true },
            Test { name: "compressed key", data: vec![0x02; 33], prefix: vec![OpData33], payload: true },
            Test { name: "signature with sighash type", data: vec![0x01; 65], prefix: vec![OpData65], payload: true },
            Test { name: "largest direct push", data: vec![0x49; 75], prefix: vec![OpData75], payload: true },
            Test { name: "one byte length", data: vec![0x49; 190], prefix: vec![OpPushData1, 190], payload: true },
            Test { name: "two byte length", data: vec![0x49; 520], prefix: vec![OpPushData2, 0x08, 0x02], payload: true },
        ];

        for test in tests {
            let script = ScriptBuilder::new().add_data(&test.data).unwrap().drain();
            assert_eq!(&script[..test.prefix.len()], test.prefix.as_slice(), "{} wrong prefix", test.name);
            let payload: &[u8] = if test.payload { &test.data } else { &[] };
            assert_eq!(&script[test.prefix.len()..], payload, "{} wrong payload", test.name);
        }
    }

    #[test]
    fn test_limits_leave_script_untouched() {
        assert_eq!(ScriptBuilder::new().add_data(&[0u8; 521]).map(|_| ()), Err(ScriptBuilderError::ElementExceedsMaxSize(521)));

        let mut builder = ScriptBuilder::new();
        for _ in 0..19 {
            builder.add_data(&[0x49; 520]).unwrap();
        }
        // 19 * 523 bytes, 63 left
        assert_eq!(builder.script().len(), 9_937);
        let before = builder.script().to_vec();
        assert_eq!(builder.add_data(&[0x49; 100]).map(|_| ()), Err(ScriptBuilderError::DataRejected(102)));
        assert_eq!(builder.script(), before.as_slice());

        builder.add_data(&[0x49; 60]).unwrap();
        assert_eq!(builder.script().len(), 9_998);
        builder.add_op(OpTrue).unwrap().add_op(OpTrue).unwrap();
        assert_eq!(builder.add_op(OpEndIf).map(|_| ()), Err(ScriptBuilderError::OpCodeRejected(OpEndIf)));
        assert!(ScriptBuilderError::OpCodeRejected(OpEndIf).to_string().starts_with("adding opcode OpEndIf "));
        assert!(ScriptBuilderError::OpCodeRejected(0xfe).to_string().starts_with("adding opcode 0xfe "));
        assert_eq!(builder.script().len(), MAX_SCRIPTS_SIZE);
    }
}

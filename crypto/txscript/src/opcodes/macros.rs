/// Declares opcode constants under `codes`, optionally with an alias, along with a
/// reverse lookup from opcode value to name.
macro_rules! opcode_list {
    ( $( opcode $(|$alias:ident|)? $name:ident<$num:literal> )* ) => {
        pub mod codes {
            $(
                #[allow(non_upper_case_globals)]
                pub const $name: u8 = $num;
                $(
                    #[allow(non_upper_case_globals)]
                    pub const $alias: u8 = $num;
                )?
            )*
        }

        /// Returns the canonical name of a known opcode.
        pub fn opcode_name(opcode: u8) -> Option<&'static str> {
            match opcode {
                $( $num => Some(stringify!($name)), )*
                _ => None,
            }
        }
    };
}

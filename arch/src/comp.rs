use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// ALU computation of a C-instruction.
/// The code is `a c1 c2 c3 c4 c5 c6`: `a` selects M instead of A as the second operand.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    TryFromPrimitive,
    IntoPrimitive,
    EnumString,
    Display,
)]
#[repr(u8)]
pub enum Comp {
    #[strum(serialize = "0")]
    ZERO = 0b0101010,
    #[strum(serialize = "1")]
    ONE = 0b0111111,
    #[strum(serialize = "-1")]
    NEGONE = 0b0111010,
    #[strum(serialize = "D")]
    D = 0b0001100,
    #[strum(serialize = "A")]
    A = 0b0110000,
    #[strum(serialize = "M")]
    M = 0b1110000,
    #[strum(serialize = "!D")]
    NOTD = 0b0001101,
    #[strum(serialize = "!A")]
    NOTA = 0b0110001,
    #[strum(serialize = "!M")]
    NOTM = 0b1110001,
    #[strum(serialize = "-D")]
    NEGD = 0b0001111,
    #[strum(serialize = "-A")]
    NEGA = 0b0110011,
    #[strum(serialize = "-M")]
    NEGM = 0b1110011,
    #[strum(serialize = "D+1")]
    INCD = 0b0011111,
    #[strum(serialize = "A+1")]
    INCA = 0b0110111,
    #[strum(serialize = "M+1")]
    INCM = 0b1110111,
    #[strum(serialize = "D-1")]
    DECD = 0b0001110,
    #[strum(serialize = "A-1")]
    DECA = 0b0110010,
    #[strum(serialize = "M-1")]
    DECM = 0b1110010,
    #[strum(serialize = "D+A")]
    ADDDA = 0b0000010,
    #[strum(serialize = "D+M")]
    ADDDM = 0b1000010,
    #[strum(serialize = "D-A")]
    SUBDA = 0b0010011,
    #[strum(serialize = "D-M")]
    SUBDM = 0b1010011,
    #[strum(serialize = "A-D")]
    SUBAD = 0b0000111,
    #[strum(serialize = "M-D")]
    SUBMD = 0b1000111,
    #[strum(serialize = "D&A")]
    ANDDA = 0b0000000,
    #[strum(serialize = "D&M")]
    ANDDM = 0b1000000,
    #[strum(serialize = "D|A")]
    ORDA = 0b0010101,
    #[strum(serialize = "D|M")]
    ORDM = 0b1010101,
}

impl Comp {
    /// True if the computation reads RAM[A] (the `a` bit).
    pub fn reads_memory(self) -> bool {
        u8::from(self) & 0b1000000 != 0
    }
}

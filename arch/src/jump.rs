use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Jump condition of a C-instruction, tested against the ALU output.
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
pub enum Jump {
    #[strum(serialize = "")]
    NULL = 0b000,
    JGT = 0b001,
    JEQ = 0b010,
    JGE = 0b011,
    JLT = 0b100,
    JNE = 0b101,
    JLE = 0b110,
    JMP = 0b111,
}

#[test]
fn test() {
    assert_eq!("".parse::<Jump>().ok(), Some(Jump::NULL));
    assert_eq!("JMP".parse::<Jump>().ok(), Some(Jump::JMP));
    assert_eq!(u8::from(Jump::JGE), 0b011);
    assert_eq!(u8::from(Jump::JLE), 0b110);
    assert!("JNZ".parse::<Jump>().is_err());
    assert!("jmp".parse::<Jump>().is_err());
}

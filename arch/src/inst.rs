use crate::{comp::Comp, dest::Dest, jump::Jump, mem::MAX_LITERAL};

use color_print::cformat;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inst {
    /// `@value`: load a 15-bit value into A.
    A(u16),
    /// `dest=comp;jump`
    C { dest: Dest, comp: Comp, jump: Jump },
}

impl Inst {
    pub fn to_bin(&self) -> u16 {
        match *self {
            Inst::A(value) => {
                debug_assert!(value <= MAX_LITERAL, "A-instruction value {value} out of range");
                value
            }
            Inst::C { dest, comp, jump } => {
                0b111 << 13
                    | (u8::from(comp) as u16) << 6
                    | (u8::from(dest) as u16) << 3
                    | u8::from(jump) as u16
            }
        }
    }

    pub fn from_bin(bin: u16) -> Option<Inst> {
        if bin >> 15 == 0 {
            return Some(Inst::A(bin));
        }
        if bin >> 13 != 0b111 {
            return None;
        }
        let comp = Comp::try_from(((bin >> 6) & 0x7F) as u8).ok()?;
        let dest = Dest::try_from(((bin >> 3) & 0x7) as u8).ok()?;
        let jump = Jump::try_from((bin & 0x7) as u8).ok()?;
        Some(Inst::C { dest, comp, jump })
    }

    /// The instruction as a line of `.hack` text.
    pub fn to_word(&self) -> String {
        format!("{:016b}", self.to_bin())
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inst::A(value) => write!(f, "@{}", value),
            Inst::C { dest, comp, jump } => {
                if *dest != Dest::NULL {
                    write!(f, "{}=", dest)?;
                }
                write!(f, "{}", comp)?;
                if *jump != Jump::NULL {
                    write!(f, ";{}", jump)?;
                }
                Ok(())
            }
        }
    }
}

impl Inst {
    pub fn cformat(&self) -> String {
        match self {
            Inst::A(value) => cformat!("<red>@</><yellow>{}</>", value),
            Inst::C { dest, comp, jump } => {
                let dest = match dest {
                    Dest::NULL => String::new(),
                    d => cformat!("<blue>{}</>=", d),
                };
                let jump = match jump {
                    Jump::NULL => String::new(),
                    j => cformat!(";<red>{}</>", j),
                };
                cformat!("{}<green>{}</>{}", dest, comp, jump)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! c {
        ($dest:ident, $comp:ident, $jump:ident) => {
            Inst::C {
                dest: Dest::$dest,
                comp: Comp::$comp,
                jump: Jump::$jump,
            }
        };
    }

    macro_rules! test_inst {
        ($($name:ident: $inst:expr => $word:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let inst = $inst;
                    assert_eq!(inst.to_word(), $word);
                    let inst_back = Inst::from_bin(inst.to_bin());
                    assert_eq!(Some(inst), inst_back);
                }
            )*
        }
    }

    test_inst! {
        test_a_zero: Inst::A(0) => "0000000000000000",
        test_a_two: Inst::A(2) => "0000000000000010",
        test_a_max: Inst::A(0x7FFF) => "0111111111111111",
        test_d_eq_m: c!(D, M, NULL) => "1111110000010000",
        test_m_eq_d: c!(M, D, NULL) => "1110001100001000",
        test_d_inc: c!(D, INCD, NULL) => "1110011111010000",
        test_jmp: c!(NULL, ZERO, JMP) => "1110101010000111",
        test_jgt: c!(NULL, D, JGT) => "1110001100000001",
        test_amd: c!(AMD, DECM, JNE) => "1111110010111101",
        test_and: c!(A, ANDDA, JLE) => "1110000000100110",
    }

    #[test]
    fn test_from_bin_rejects_undefined() {
        // 0b101 prefix is not a C-instruction
        assert_eq!(Inst::from_bin(0b1010_0000_0000_0000), None);
        // comp 0b1111111 is not in the table
        assert_eq!(Inst::from_bin(0b1111_1111_1100_0000), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Inst::A(17).to_string(), "@17");
        assert_eq!(c!(D, INCD, NULL).to_string(), "D=D+1");
        assert_eq!(c!(NULL, ZERO, JMP).to_string(), "0;JMP");
        assert_eq!(c!(AM, SUBMD, JGE).to_string(), "AM=M-D;JGE");
    }
}

use arch::{
    inst::Inst,
    mem::{MAX_LITERAL, ROM_SIZE, VAR_BASE, VAR_LIMIT},
};

use crate::{
    error::{Error, LineError},
    parser::{Kind, Operand, Parser},
    symbol::{Origin, SymbolTable},
};

/// Assemble source lines into a program.
pub fn assemble<S: AsRef<str>>(lines: &[S]) -> Result<Program, LineError> {
    Assembler::new().run(lines)
}

pub fn assemble_str(src: &str) -> Result<Program, LineError> {
    let lines: Vec<&str> = src.lines().collect();
    assemble(&lines)
}

// ----------------------------------------------------------------------------
// Program

/// One emitted instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
    pub line_idx: usize,
    pub pc: u16,
    pub inst: Inst,
}

pub struct Program {
    pub code: Vec<Code>,
    pub symbols: SymbolTable,
}

impl Program {
    /// One 16-character binary string per instruction.
    pub fn words(&self) -> impl Iterator<Item = String> + '_ {
        self.code.iter().map(|code| code.inst.to_word())
    }

    /// Contents of the `.hack` file.
    pub fn to_text(&self) -> String {
        self.words().map(|word| word + "\n").collect()
    }

    /// Labels that no A-instruction refers to, with their line index.
    pub fn unused_labels(&self) -> impl Iterator<Item = (&str, usize)> {
        self.symbols.iter().filter_map(|(name, symbol)| {
            match (symbol.origin, symbol.line_idx, symbol.used) {
                (Origin::Label, Some(line_idx), false) => Some((name, line_idx)),
                _ => None,
            }
        })
    }
}

// ----------------------------------------------------------------------------
// Assembler

/// State of a single assembly run.
pub struct Assembler {
    symbols: SymbolTable,
    /// ROM address of the next instruction (first pass).
    pc: usize,
    /// RAM address of the next variable (second pass).
    next_var: u16,
}

impl Assembler {
    pub fn new() -> Self {
        Assembler {
            symbols: SymbolTable::new(),
            pc: 0,
            next_var: VAR_BASE,
        }
    }

    pub fn run<S: AsRef<str>>(mut self, lines: &[S]) -> Result<Program, LineError> {
        self.collect_labels(lines)?;
        let code = self.generate(lines)?;
        Ok(Program {
            code,
            symbols: self.symbols,
        })
    }

    /// First pass: bind every label to the address of the instruction that follows it.
    fn collect_labels<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<(), LineError> {
        for line in Parser::new(lines) {
            let at = |error| LineError::new(line.idx(), error);
            match line.kind() {
                Kind::Label => {
                    let name = line.label().map_err(at)?;
                    self.symbols
                        .bind(name, self.pc as u16, Origin::Label, line.idx())
                        .map_err(at)?;
                }
                Kind::Address | Kind::Compute => {
                    if self.pc >= ROM_SIZE {
                        return Err(at(Error::ProgramTooLarge(ROM_SIZE)));
                    }
                    self.pc += 1;
                }
            }
        }
        Ok(())
    }

    /// Second pass: encode instructions, allocating variables on first use.
    fn generate<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<Vec<Code>, LineError> {
        let mut code = vec![];
        let mut pc: u16 = 0;
        for line in Parser::new(lines) {
            let at = |error| LineError::new(line.idx(), error);
            let inst = match line.kind() {
                Kind::Label => continue,
                Kind::Address => {
                    let operand = line.operand().map_err(at)?;
                    Inst::A(self.resolve(operand, line.idx()).map_err(at)?)
                }
                Kind::Compute => line.fields().to_inst().map_err(at)?,
            };
            code.push(Code {
                line_idx: line.idx(),
                pc,
                inst,
            });
            pc += 1;
        }
        Ok(code)
    }

    fn resolve(&mut self, operand: Operand, line_idx: usize) -> Result<u16, Error> {
        let name = match operand {
            Operand::Literal(value) => return Ok(value),
            Operand::Symbol(name) => name,
        };
        if let Some(address) = self.symbols.lookup(name) {
            if address > MAX_LITERAL {
                return Err(Error::AddressOutOfRange(name.to_string(), address));
            }
            return Ok(address);
        }
        if self.next_var >= VAR_LIMIT {
            return Err(Error::AddressSpaceExhausted(name.to_string()));
        }
        let address = self.next_var;
        self.symbols.bind(name, address, Origin::Variable, line_idx)?;
        self.next_var += 1;
        Ok(address)
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(src: &str) -> Vec<String> {
        assemble_str(src).unwrap().words().collect()
    }

    fn error(src: &str) -> LineError {
        match assemble_str(src) {
            Ok(_) => panic!("expected failure"),
            Err(err) => err,
        }
    }

    #[test]
    fn test_literal() {
        assert_eq!(words("@2"), vec!["0000000000000010"]);
    }

    #[test]
    fn test_compute() {
        assert_eq!(words("D=D+1"), vec!["1110011111010000"]);
    }

    #[test]
    fn test_forward_label() {
        let src = "@LOOP\n0;JMP\n// skip\nD=1\n(LOOP)\nM=D\n";
        let program = assemble_str(src).unwrap();
        assert_eq!(program.symbols.address_of("LOOP"), Some(3));
        assert_eq!(program.code[0].inst, Inst::A(3));
        assert_eq!(program.code.len(), 4);
    }

    #[test]
    fn test_variable_order() {
        let src = "@foo\n@bar\n@foo\n@R3\n@baz";
        assert_eq!(
            words(src),
            vec![
                "0000000000010000",
                "0000000000010001",
                "0000000000010000",
                "0000000000000011",
                "0000000000010010",
            ]
        );
    }

    #[test]
    fn test_label_is_not_variable() {
        // `END` is referenced before declaration but must resolve to ROM, not RAM
        let src = "@x\n@END\n(END)\n@y";
        let program = assemble_str(src).unwrap();
        assert_eq!(program.symbols.address_of("x"), Some(16));
        assert_eq!(program.symbols.address_of("END"), Some(2));
        assert_eq!(program.symbols.address_of("y"), Some(17));
    }

    #[test]
    fn test_pc_and_line_index() {
        let program = assemble_str("// c\n(A)\n@1\n\nD=A").unwrap();
        let pos: Vec<(usize, u16)> = program.code.iter().map(|c| (c.line_idx, c.pc)).collect();
        assert_eq!(pos, vec![(2, 0), (4, 1)]);
    }

    #[test]
    fn test_unknown_comp() {
        let err = error("@1\nD=D+2");
        assert_eq!(err.line_idx, 1);
        assert!(matches!(err.error, Error::UnknownComp(_)));
    }

    #[test]
    fn test_duplicate_label() {
        let err = error("(L)\n@1\n(L)\n@2");
        assert_eq!(err.line_idx, 2);
        assert!(matches!(err.error, Error::DuplicateLabel(_, 0)));
    }

    #[test]
    fn test_builtin_label() {
        let err = error("(KBD)\n@1");
        assert!(matches!(err.error, Error::ReservedSymbol(_)));
    }

    #[test]
    fn test_address_space_exhausted() {
        let count = (VAR_LIMIT - VAR_BASE) as usize;
        let mut src: Vec<String> = (0..count).map(|n| format!("@v{n}")).collect();
        assert!(assemble(&src).is_ok());
        src.push("@overflow".to_string());
        let err = match assemble(&src) {
            Ok(_) => panic!("expected failure"),
            Err(err) => err,
        };
        assert_eq!(err.line_idx, count);
        assert!(matches!(err.error, Error::AddressSpaceExhausted(_)));
    }

    #[test]
    fn test_program_too_large() {
        let mut src = vec!["D=0"; ROM_SIZE];
        src.push("(END)");
        assert!(assemble(&src).is_ok());
        src.push("D=0");
        let err = match assemble(&src) {
            Ok(_) => panic!("expected failure"),
            Err(err) => err,
        };
        assert!(matches!(err.error, Error::ProgramTooLarge(_)));
    }

    #[test]
    fn test_label_past_last_addressable_word() {
        let mut src = vec!["D=0"; ROM_SIZE - 1];
        src.push("@END");
        src.push("(END)");
        let err = match assemble(&src) {
            Ok(program) => panic!("expected failure, got {:?}", program.code.last()),
            Err(err) => err,
        };
        assert_eq!(err.line_idx, ROM_SIZE - 1);
        assert!(matches!(
            err.error,
            Error::AddressOutOfRange(name, 0x8000) if name == "END"
        ));
    }

    #[test]
    fn test_label_at_last_addressable_word() {
        let mut src = vec!["D=0"; ROM_SIZE - 2];
        src.push("@END");
        src.push("(END)");
        src.push("0;JMP");
        let program = assemble(&src).unwrap();
        assert_eq!(program.code[ROM_SIZE - 2].inst, Inst::A(0x7FFF));
    }

    #[test]
    fn test_unused_labels() {
        let program = assemble_str("(START)\n@END\n0;JMP\n(END)\n(UNUSED)\n@START").unwrap();
        let unused: Vec<(&str, usize)> = program.unused_labels().collect();
        assert_eq!(unused, vec![("UNUSED", 4)]);
    }
}

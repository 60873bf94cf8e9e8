use arch::{comp::Comp, dest::Dest, inst::Inst, jump::Jump, mem::MAX_LITERAL};

use crate::error::Error;

const COMMENT: &str = "//";

// ----------------------------------------------------------------------------
// Parser

/// Cursor over raw source lines that skips blank and comment-only lines.
/// Each pass builds its own `Parser`; cursors never share state.
pub struct Parser<'a, S> {
    lines: &'a [S],
    next: usize,
}

impl<'a, S: AsRef<str>> Parser<'a, S> {
    pub fn new(lines: &'a [S]) -> Self {
        Parser { lines, next: 0 }
    }

    /// True while unread raw lines remain, even if they are all blank.
    pub fn has_more(&self) -> bool {
        self.next < self.lines.len()
    }

    /// Move to the next line with code on it.
    pub fn advance(&mut self) -> Option<Line<'a>> {
        while self.has_more() {
            let idx = self.next;
            self.next += 1;
            let line = Line::new(idx, self.lines[idx].as_ref());
            if !line.code().is_empty() {
                return Some(line);
            }
        }
        None
    }
}

impl<'a, S: AsRef<str>> Iterator for Parser<'a, S> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Line<'a>> {
        self.advance()
    }
}

// ----------------------------------------------------------------------------
// Line

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// `@value` or `@symbol`
    Address,
    /// `dest=comp;jump`
    Compute,
    /// `(symbol)`
    Label,
}

#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    idx: usize,
    raw: &'a str,
    code: &'a str,
}

impl<'a> Line<'a> {
    pub fn new(idx: usize, raw: &'a str) -> Self {
        let code = match raw.split_once(COMMENT) {
            Some((code, _)) => code,
            None => raw,
        };
        Line {
            idx,
            raw,
            code: code.trim(),
        }
    }

    /// 0-based line index in the source.
    pub fn idx(&self) -> usize {
        self.idx
    }

    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// The line without comment and surrounding whitespace.
    pub fn code(&self) -> &'a str {
        self.code
    }

    pub fn comment(&self) -> Option<&'a str> {
        self.raw.split_once(COMMENT).map(|(_, comment)| comment)
    }

    pub fn kind(&self) -> Kind {
        match self.code.chars().next() {
            Some('@') => Kind::Address,
            Some('(') => Kind::Label,
            _ => Kind::Compute,
        }
    }

    /// Operand of an A-instruction.
    pub fn operand(&self) -> Result<Operand<'a>, Error> {
        debug_assert_eq!(self.kind(), Kind::Address);
        Operand::parse(&self.code[1..])
    }

    /// Name declared by a label line.
    pub fn label(&self) -> Result<&'a str, Error> {
        debug_assert_eq!(self.kind(), Kind::Label);
        let name = self
            .code
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| Error::MalformedLabel(self.code.to_string()))?;
        if is_symbol(name) {
            Ok(name)
        } else {
            Err(Error::MalformedSymbol(name.to_string()))
        }
    }

    /// Mnemonic fields of a C-instruction.
    pub fn fields(&self) -> Fields<'a> {
        debug_assert_eq!(self.kind(), Kind::Compute);
        let (dest_comp, jump) = match self.code.split_once(';') {
            Some((dest_comp, jump)) => (dest_comp, Some(jump.trim())),
            None => (self.code, None),
        };
        let (dest, comp) = match dest_comp.split_once('=') {
            Some((dest, comp)) => (dest.trim(), comp.trim()),
            None => ("", dest_comp.trim()),
        };
        Fields { dest, comp, jump }
    }
}

// ----------------------------------------------------------------------------
// Operand

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand<'a> {
    Literal(u16),
    Symbol(&'a str),
}

impl<'a> Operand<'a> {
    fn parse(s: &'a str) -> Result<Self, Error> {
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            return match s.parse::<u16>() {
                Ok(v) if v <= MAX_LITERAL => Ok(Operand::Literal(v)),
                _ => Err(Error::LiteralOutOfRange(s.to_string())),
            };
        }
        if is_symbol(s) {
            Ok(Operand::Symbol(s))
        } else {
            Err(Error::MalformedSymbol(s.to_string()))
        }
    }
}

/// Letters, digits, `_`, `.`, `$` and `:`, not starting with a digit.
pub fn is_symbol(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(head) if !head.is_ascii_digit() && is_symbol_char(head) => chars.all(is_symbol_char),
        _ => false,
    }
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$' | ':')
}

// ----------------------------------------------------------------------------
// Fields

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fields<'a> {
    pub dest: &'a str,
    pub comp: &'a str,
    /// `None` when the line has no `;`.
    pub jump: Option<&'a str>,
}

impl Fields<'_> {
    pub fn to_inst(&self) -> Result<Inst, Error> {
        let dest = self
            .dest
            .parse::<Dest>()
            .map_err(|_| Error::UnknownDest(self.dest.to_string()))?;
        let comp = self
            .comp
            .parse::<Comp>()
            .map_err(|_| Error::UnknownComp(self.comp.to_string()))?;
        let jump = self.jump.unwrap_or("");
        let jump = jump
            .parse::<Jump>()
            .map_err(|_| Error::UnknownJump(jump.to_string()))?;
        Ok(Inst::C { dest, comp, jump })
    }
}

use color_print::cprintln;

#[derive(Debug)]
pub enum Msg {
    Error(String),
    Warn(String),
    Note(String),
}

impl Msg {
    /// `info` is (file, 1-based line number, raw line).
    pub fn print(&self, info: (&str, usize, &str)) {
        let (file, line, raw) = info;
        self.print_header();
        cprintln!("     <blue>--></> <underline>{}:{}</>", file, line);
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", line, raw);
        cprintln!("      <blue>|</>");
    }

    /// Message without a source location.
    pub fn print_bare(&self) {
        self.print_header();
    }

    fn print_header(&self) {
        match self {
            Msg::Error(msg) => cprintln!("<red,bold>error</>: {}", msg),
            Msg::Warn(msg) => cprintln!("<yellow,bold>warn</>: {}", msg),
            Msg::Note(msg) => cprintln!("<green,bold>note</>: {}", msg),
        }
    }
}

#[test]
fn test_print() {
    let info = ("main.asm", 3, "D=Q");
    Msg::Error("Unknown comp mnemonic: `Q`".to_string()).print(info);
    Msg::Warn("Unused label: `END`".to_string()).print(info);
    Msg::Note("Already defined here".to_string()).print_bare();
}

use crate::assembler::Program;
use crate::parser::{Kind, Line};
use color_print::cformat;

/// Print every source line next to its ROM address and machine word.
pub fn print_dump<S: AsRef<str>>(path: &str, lines: &[S], program: &Program) {
    println!(
        "{}+------[{}]{}",
        "-".repeat(24),
        path,
        "-".repeat(45usize.saturating_sub(path.len()))
    );

    let mut code = program.code.iter().peekable();
    for (idx, raw) in lines.iter().enumerate() {
        let line = Line::new(idx, raw.as_ref());
        let comment = line
            .comment()
            .map(|s| cformat!("<dim>//{}</>", s))
            .unwrap_or_default();
        let line_num = idx + 1;

        let body = match code.next_if(|c| c.line_idx == idx) {
            Some(c) => format!(
                "[{:04X}] {:016b} | {:>4}:   {} {}",
                c.pc,
                c.inst.to_bin(),
                line_num,
                c.inst.cformat(),
                comment
            ),
            None if line.code().is_empty() => {
                format!("{:24}| {:>4}: {}", "", line_num, comment)
            }
            None => {
                let label = match line.kind() {
                    Kind::Label => match line
                        .label()
                        .ok()
                        .and_then(|name| program.symbols.address_of(name))
                    {
                        Some(addr) => cformat!("<g>{}</> <dim>= {:04X}</>", line.code(), addr),
                        None => cformat!("<r,s>{}</>", line.code()),
                    },
                    _ => cformat!("<r,s>{}</>", line.code()),
                };
                format!("{:24}| {:>4}: {} {}", "", line_num, label, comment)
            }
        };
        println!("{}", body);
    }
    println!("------------------------+-----------------------------------------------------");
}

use once_cell::sync::Lazy;

/// Base address of the memory-mapped screen buffer.
pub const SCREEN: u16 = 0x4000;
/// Memory-mapped keyboard register.
pub const KBD: u16 = 0x6000;

/// First RAM address handed out to variables.
pub const VAR_BASE: u16 = 16;
/// Variables must stay below the screen buffer.
pub const VAR_LIMIT: u16 = SCREEN;

/// Number of words in instruction memory.
pub const ROM_SIZE: usize = 0x8000;
/// Largest value an A-instruction can load (the top bit is the opcode).
pub const MAX_LITERAL: u16 = 0x7FFF;

/// Predefined symbols, in declaration order.
/// `R0`-`R4` alias the segment pointers.
pub static BUILTINS: Lazy<Vec<(String, u16)>> = Lazy::new(|| {
    let mut symbols = vec![
        ("SP".to_string(), 0),
        ("LCL".to_string(), 1),
        ("ARG".to_string(), 2),
        ("THIS".to_string(), 3),
        ("THAT".to_string(), 4),
    ];
    symbols.extend((0..16).map(|n| (format!("R{n}"), n)));
    symbols.push(("SCREEN".to_string(), SCREEN));
    symbols.push(("KBD".to_string(), KBD));
    symbols
});

#[test]
fn test_builtins() {
    let get = |name: &str| {
        BUILTINS
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, addr)| *addr)
    };
    assert_eq!(BUILTINS.len(), 23);
    assert_eq!(get("THAT"), Some(4));
    assert_eq!(get("R0"), Some(0));
    assert_eq!(get("R15"), Some(15));
    assert_eq!(get("SCREEN"), Some(16384));
    assert_eq!(get("KBD"), Some(24576));
    assert_eq!(get("R16"), None);
}

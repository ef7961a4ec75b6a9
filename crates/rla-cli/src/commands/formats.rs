//! Lists registered output formats.

use anyhow::Result;
use rla_io::registry::OutputRegistry;

/// Runs the formats command.
pub fn run(verbose: u8) -> Result<()> {
    let registry = OutputRegistry::global();
    for name in registry.format_names() {
        let Some(info) = registry.get(name) else {
            continue;
        };
        println!("{:<8} {:<20} .{}", info.name, info.description, info.extensions.join(", ."));
        if verbose > 0 && !info.capabilities.is_empty() {
            println!("         capabilities: {:?}", info.capabilities);
        }
    }
    Ok(())
}

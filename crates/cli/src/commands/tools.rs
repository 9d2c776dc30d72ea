//! `pd-cli tools`.

use std::io::Write;

use parcel_desk_server::tools::{Tool, all_tools, get_tools_by_domain};

use super::Outcome;

/// List tools, optionally restricted to one domain.
///
/// # Errors
///
/// Returns an error for an unknown domain or if stdout cannot be written.
pub fn list(domain: Option<&str>) -> Result<Outcome, Box<dyn std::error::Error>> {
    let tools = match domain {
        Some(domain) => {
            let tools = get_tools_by_domain(domain);
            if tools.is_empty() {
                return Err(format!("Unknown domain: {domain} (expected: orders, support)").into());
            }
            tools
        }
        None => all_tools(),
    };

    let mut stdout = std::io::stdout().lock();
    for line in tools.iter().map(format_tool) {
        writeln!(stdout, "{line}")?;
    }
    Ok(Outcome::Success)
}

fn format_tool(tool: &Tool) -> String {
    let access = if tool.is_read_only() { "read " } else { "write" };
    format!("{:<26} {access}  {}", tool.name, tool.description)
}

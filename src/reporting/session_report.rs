use crate::session_processing::session_aggregator::SessionNet;

use std::fmt::Display;
use std::io::{self, Write};

/// Writes the result of each player of a session as `name: net`, biggest winner first.
///
/// Players with the same net keep nickname order.
pub fn write_session_results<W: Write>(out: &mut W, session_net: &SessionNet) -> io::Result<()> {
    let mut results: Vec<_> = session_net.iter().collect();
    results.sort_by(|r1, r2| r2.1.total_cmp(r1.1));

    for (nickname, net) in results {
        writeln!(out, "{nickname}: {}", format_amount(*net))?;
    }
    Ok(())
}

/// Writes the participants of a merged session followed by the confirmation line.
pub fn write_session_added<W: Write>(
    out: &mut W,
    session_net: &SessionNet,
    session_id: &str,
) -> io::Result<()> {
    for (nickname, net) in session_net {
        writeln!(out, "{nickname} {}", format_amount(*net))?;
    }
    writeln!(out, "Poker game on {session_id} added")
}

/// Writes each nickname that blocked a session followed by the failure line.
pub fn write_unknown_players<W: Write>(out: &mut W, unknown: &[String]) -> io::Result<()> {
    write_lines(out, unknown)?;
    writeln!(out, "Not all players known")
}

/// Formats a dollar amount, keeping a `.0` on whole values (`3.0`, `-10.0`, `5.5`).
pub fn format_amount(amount: f64) -> String {
    format!("{amount:?}")
}

/// Writes one item per line.
pub fn write_lines<W, I>(out: &mut W, items: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator,
    I::Item: Display,
{
    for item in items {
        writeln!(out, "{item}")?;
    }
    Ok(())
}

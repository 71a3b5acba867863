//! Interactive price checker.

use std::io::{self, BufRead, Write};

use bullion_agent::tool::{respond, FetchMetalPriceArgs};
use bullion_core::{MetalKind, QuoteService};

use super::ratio;

const GOODBYE: &str = "👋 Thank you for using the Precious Metals Price Checker! Goodbye!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Price(MetalKind),
    Ratio,
    Exit,
}

impl MenuChoice {
    fn from_number(option: u32) -> Option<Self> {
        match option {
            1 => Some(Self::Price(MetalKind::Gold)),
            2 => Some(Self::Price(MetalKind::Silver)),
            3 => Some(Self::Ratio),
            4 => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Runs the menu until the user exits or input ends.
pub async fn run<R, W>(service: &dyn QuoteService, mut input: R, mut out: W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "🚀 Welcome to the Precious Metals Price Checker!")?;

    loop {
        write_menu(&mut out)?;
        let Some(answer) = prompt(&mut input, &mut out, "\n💬 Please select an option (1-4): ")?
        else {
            writeln!(out)?;
            writeln!(out, "{GOODBYE}")?;
            return Ok(());
        };

        let Ok(option) = answer.parse::<u32>() else {
            writeln!(out, "❌ Please enter a valid number (1-4)")?;
            continue;
        };

        let result = match MenuChoice::from_number(option) {
            Some(MenuChoice::Price(metal)) => {
                writeln!(out, "{} Fetching current {metal} rates...", metal.symbol())?;
                let args = FetchMetalPriceArgs {
                    metal: metal.label().to_string(),
                };
                respond(service, args).await
            }
            Some(MenuChoice::Ratio) => {
                writeln!(out, "⚖️ Calculating gold/silver ratio...")?;
                match ratio::summarize(service).await {
                    Ok(summary) => summary.render_text(),
                    Err(error) => ratio::failure_text(&error),
                }
            }
            Some(MenuChoice::Exit) => {
                writeln!(out, "{GOODBYE}")?;
                return Ok(());
            }
            None => {
                writeln!(out, "❌ Invalid option. Please select 1, 2, 3, or 4.")?;
                continue;
            }
        };

        let rule = "=".repeat(60);
        writeln!(out, "\n{rule}\n📊 RESULT:\n{rule}\n{result}\n{rule}")?;

        let again = prompt(
            &mut input,
            &mut out,
            "\n🔄 Would you like to check another rate? (y/n): ",
        )?
        .map(|answer| answer.to_lowercase());
        if !matches!(again.as_deref(), Some("y" | "yes")) {
            writeln!(out, "{GOODBYE}")?;
            return Ok(());
        }
    }
}

fn write_menu<W: Write>(out: &mut W) -> io::Result<()> {
    let rule = "=".repeat(50);
    writeln!(out, "\n{rule}")?;
    writeln!(out, "🏛️ PRECIOUS METALS PRICE CHECKER")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "1. 🥇 Gold Rate")?;
    writeln!(out, "2. 🥈 Silver Rate")?;
    writeln!(out, "3. ⚖️ Gold/Silver Ratio")?;
    writeln!(out, "4. 🚪 Exit")?;
    writeln!(out, "{rule}")
}

/// `None` once input is exhausted.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
) -> io::Result<Option<String>> {
    write!(out, "{question}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

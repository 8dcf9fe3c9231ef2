//! Commands typed at the viewer prompt.

use anyhow::{anyhow, bail, Context, Result};
use shared::domain::{OrganizationId, PerPage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerCommand {
    Next,
    Previous,
    GoToPage(u32),
    Organization(OrganizationId),
    PerPage(PerPage),
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  n, next            next page
  p, prev            previous page
  g N, page N        jump to page N
  o ID, org ID       switch organization
  s N, size N        page size (10, 25 or 100)
  h, help            this help
  q, quit            exit";

impl ViewerCommand {
    pub fn parse(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            bail!("empty command; type 'help' for the list");
        };
        let argument = parts.next();
        if parts.next().is_some() {
            bail!("too many arguments for '{verb}'");
        }

        let command = match verb.to_ascii_lowercase().as_str() {
            "n" | "next" => ViewerCommand::Next,
            "p" | "prev" | "previous" => ViewerCommand::Previous,
            "g" | "page" => {
                let page: u32 = require(verb, argument)?
                    .parse()
                    .context("page must be a positive number")?;
                if page == 0 {
                    bail!("pages start at 1");
                }
                ViewerCommand::GoToPage(page)
            }
            "o" | "org" => ViewerCommand::Organization(OrganizationId(
                require(verb, argument)?
                    .parse()
                    .context("organization id must be a number")?,
            )),
            "s" | "size" => {
                let size: u32 = require(verb, argument)?
                    .parse()
                    .context("page size must be a number")?;
                ViewerCommand::PerPage(PerPage::try_from(size).map_err(|e| anyhow!(e))?)
            }
            "h" | "help" | "?" => ViewerCommand::Help,
            "q" | "quit" | "exit" => ViewerCommand::Quit,
            other => bail!("unknown command '{other}'; type 'help' for the list"),
        };

        if argument.is_some()
            && matches!(
                command,
                ViewerCommand::Next
                    | ViewerCommand::Previous
                    | ViewerCommand::Help
                    | ViewerCommand::Quit
            )
        {
            bail!("'{verb}' takes no argument");
        }
        Ok(command)
    }
}

fn require<'a>(verb: &str, argument: Option<&'a str>) -> Result<&'a str> {
    argument.ok_or_else(|| anyhow!("'{verb}' needs an argument"))
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ledgerdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ledgerdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Line-oriented front end for a [`Desk`].
//!
//! Each input line is one command. After every command pending label lookups are settled, queued
//! notices are printed and the tab strip is redrawn.

use std::io::{self, Write};
use std::str::FromStr;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::desk::Desk;
use crate::drafts::{DraftKey, DraftView};
use crate::model::{EntityId, EntityKind, FieldValue, IdError, ParseEntityKindError, Tab};
use crate::nav::Navigation;

const HELP: &str = "\
commands:
  go <path>               open a page (menu click)
  select <path>           activate an open tab
  close [<path>]          close a tab (default: the active one)
  back | forward          move through history
  tabs                    list open tabs
  show                    show the form of the current page
  set <field> <value>     edit a field of the current form
  save                    save the current form
  list <kind>             load a list view (organizations, nomenclature, contragents)
  open <kind> <id>        open a record's edit page
  delete <kind> <id>      delete a record
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(String),
    Select(String),
    Close(Option<String>),
    Back,
    Forward,
    Tabs,
    Show,
    Set { field: String, value: String },
    Save,
    List(EntityKind),
    Open(EntityKind, EntityId),
    Delete(EntityKind, EntityId),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{command}' needs a {argument}")]
    MissingArgument { command: &'static str, argument: &'static str },
    #[error("'{command}' takes no arguments")]
    UnexpectedArgument { command: &'static str },
    #[error(transparent)]
    Kind(#[from] ParseEntityKindError),
    #[error("invalid id: {0}")]
    Id(#[from] IdError),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        let mut args = rest.split_whitespace();

        let command = match name {
            "" => return Err(ParseCommandError::Empty),
            "go" => Self::Go(required(args.next(), "go", "path")?.to_owned()),
            "select" => Self::Select(required(args.next(), "select", "path")?.to_owned()),
            "close" => Self::Close(args.next().map(str::to_owned)),
            "back" => no_args(rest, "back", Self::Back)?,
            "forward" => no_args(rest, "forward", Self::Forward)?,
            "tabs" => no_args(rest, "tabs", Self::Tabs)?,
            "show" => no_args(rest, "show", Self::Show)?,
            "save" => no_args(rest, "save", Self::Save)?,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "set" => {
                let field = required(args.next(), "set", "field")?;
                let value = rest[field.len()..].trim();
                Self::Set {
                    field: field.to_owned(),
                    value: value.to_owned(),
                }
            }
            "list" => Self::List(required(args.next(), "list", "kind")?.parse()?),
            "open" | "delete" => {
                let command = if name == "open" { "open" } else { "delete" };
                let kind: EntityKind = required(args.next(), command, "kind")?.parse()?;
                let id = EntityId::new(required(args.next(), command, "id")?)?;
                if name == "open" {
                    Self::Open(kind, id)
                } else {
                    Self::Delete(kind, id)
                }
            }
            other => return Err(ParseCommandError::Unknown(other.to_owned())),
        };
        Ok(command)
    }
}

fn required<'a>(
    arg: Option<&'a str>,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, ParseCommandError> {
    arg.ok_or(ParseCommandError::MissingArgument { command, argument })
}

fn no_args(
    rest: &str,
    command: &'static str,
    parsed: Command,
) -> Result<Command, ParseCommandError> {
    if rest.is_empty() {
        Ok(parsed)
    } else {
        Err(ParseCommandError::UnexpectedArgument { command })
    }
}

/// One-line tab strip. The active tab is bracketed; every tab but the home tab shows a close mark.
pub fn render_tab_strip(tabs: &[Tab], location: &str) -> String {
    tabs.iter()
        .enumerate()
        .map(|(index, tab)| {
            let closable = if index == 0 { "" } else { " x" };
            if tab.path() == location {
                format!("[{}{closable}]", tab.label())
            } else {
                format!(" {}{closable} ", tab.label())
            }
        })
        .collect::<Vec<_>>()
        .join("|")
}

/// Reads commands from `input` until it ends or `quit` is entered.
pub async fn run<R, W>(desk: &Desk, input: R, output: &mut W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    draw(desk, output).await?;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => execute(desk, command, output).await?,
            Err(err) => writeln!(output, "error: {err}")?,
        }

        desk.settle().await;
        for notice in desk.take_notices().await {
            writeln!(output, "{notice}")?;
        }
        draw(desk, output).await?;
    }
    output.flush()
}

async fn draw<W: Write>(desk: &Desk, output: &mut W) -> io::Result<()> {
    let (strip, location) = desk
        .with_session(|session| {
            let location = session.location();
            (render_tab_strip(session.tabs().list(), location), location.to_owned())
        })
        .await;
    writeln!(output, "{strip}")?;
    write!(output, "{location}> ")?;
    output.flush()
}

async fn execute<W: Write>(desk: &Desk, command: Command, output: &mut W) -> io::Result<()> {
    match command {
        Command::Go(path) => report_navigation(output, desk.navigate(&path).await),
        Command::Select(path) => report_navigation(output, desk.select(&path).await),
        Command::Close(path) => {
            let path = match path {
                Some(path) => path,
                None => desk.location().await,
            };
            let outcome = desk.close(&path).await;
            match (outcome.closed, outcome.navigate_to) {
                (false, _) => writeln!(output, "nothing to close at {path}"),
                (true, Some(target)) => writeln!(output, "closed {path}, now at {target}"),
                (true, None) => writeln!(output, "closed {path}"),
            }
        }
        Command::Back => match desk.back().await {
            Some(nav) => report_navigation(output, nav),
            None => writeln!(output, "no earlier page"),
        },
        Command::Forward => match desk.forward().await {
            Some(nav) => report_navigation(output, nav),
            None => writeln!(output, "no later page"),
        },
        Command::Tabs => {
            let location = desk.location().await;
            for tab in desk.tabs().await {
                let marker = if tab.path() == location { '*' } else { ' ' };
                writeln!(output, "{marker} {:<28} {}", tab.label(), tab.path())?;
            }
            Ok(())
        }
        Command::Show => show(desk, output).await,
        Command::Set { field, value } => {
            match desk.update_active(&field, FieldValue::Text(value)).await {
                Ok(rev) => writeln!(output, "{field} updated (rev {rev})"),
                Err(err) => writeln!(output, "error: {err}"),
            }
        }
        Command::Save => match desk.commit_active().await {
            Ok(saved) if saved.closed => writeln!(output, "saved"),
            Ok(_) => writeln!(output, "saved; the form changed meanwhile and stays open"),
            Err(err) => writeln!(output, "error: {err}"),
        },
        Command::List(kind) => match desk.refresh_list(kind).await {
            Ok(rows) => {
                if rows.is_empty() {
                    writeln!(output, "no {kind} records")?;
                }
                for row in rows {
                    writeln!(
                        output,
                        "{:>6}  {:<32} {:<14} {}",
                        row.id.as_str(),
                        row.name,
                        row.inn.as_deref().unwrap_or("-"),
                        row.status.as_deref().unwrap_or("")
                    )?;
                }
                Ok(())
            }
            Err(err) => writeln!(output, "error: {err}"),
        },
        Command::Open(kind, id) => match desk.open_row(kind, &id).await {
            Ok(nav) => report_navigation(output, nav),
            Err(err) => writeln!(output, "error: {err}"),
        },
        Command::Delete(kind, id) => match desk.delete_entity(kind, &id).await {
            Ok(()) => Ok(()),
            Err(err) => writeln!(output, "error: {err}"),
        },
        Command::Help => writeln!(output, "{HELP}"),
        Command::Quit => Ok(()),
    }
}

fn report_navigation<W: Write>(output: &mut W, nav: Navigation) -> io::Result<()> {
    if nav.lookup.is_some() {
        writeln!(output, "-> {} (resolving title)", nav.location)
    } else {
        writeln!(output, "-> {}", nav.location)
    }
}

async fn show<W: Write>(desk: &Desk, output: &mut W) -> io::Result<()> {
    let location = desk.location().await;
    let Some(target) = desk.with_session(|session| session.draft_target(&location)).await else {
        return writeln!(output, "{location} has no form");
    };

    let view = match &target.key {
        DraftKey::Edit(id) => desk.get_or_init_edit(target.kind, id).await,
        DraftKey::Create => desk.get_or_init_create(target.kind).await,
    };
    match view {
        Ok(view) => print_draft(output, &view),
        Err(err) => writeln!(output, "error: {err}"),
    }
}

fn print_draft<W: Write>(output: &mut W, view: &DraftView) -> io::Result<()> {
    writeln!(output, "{} (rev {})", view.draft.display_name(), view.rev)?;
    for (field, value) in view.draft.fields() {
        writeln!(output, "  {field:<18} {value}")?;
    }
    Ok(())
}

use crate::core::pricing::format_cost;
use crate::core::session::PanelSession;
use crate::core::{CompletionClient, OrderForm, OrderGateway, Storage};
use crate::domain::ledger::TIMESTAMP_FORMAT;
use crate::utils::error::{PanelError, Result};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const HELP: &str = "\
Commands:
  services                              list available services
  suggest <text>                        ask the model which service fits
  order <quantity> <link> <service>     place an order
  history                               show orders placed in this session
  export [filename]                     write the order history as CSV
  quit                                  leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    Services,
    Suggest(String),
    Order(OrderForm),
    History,
    Export(Option<String>),
    Quit,
}

/// 解析一行輸入；空白行回傳 None
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "help" | "?" => ShellCommand::Help,
        "services" => ShellCommand::Services,
        "history" => ShellCommand::History,
        "quit" | "exit" => ShellCommand::Quit,
        "suggest" => {
            if rest.is_empty() {
                return Err(PanelError::validation("request", "Usage: suggest <text>"));
            }
            ShellCommand::Suggest(rest.to_string())
        }
        "export" => ShellCommand::Export((!rest.is_empty()).then(|| rest.to_string())),
        "order" => ShellCommand::Order(parse_order(rest)?),
        other => {
            return Err(PanelError::validation(
                "command",
                format!("Unknown command '{}', type 'help'", other),
            ))
        }
    };

    Ok(Some(command))
}

fn parse_order(args: &str) -> Result<OrderForm> {
    let usage = || PanelError::validation("order", "Usage: order <quantity> <link> <service>");

    let (quantity, rest) = args.trim().split_once(char::is_whitespace).ok_or_else(usage)?;
    let (link, service) = rest
        .trim_start()
        .split_once(char::is_whitespace)
        .ok_or_else(usage)?;
    let service = service.trim();
    if service.is_empty() {
        return Err(usage());
    }

    let quantity = quantity.parse::<u32>().map_err(|_| {
        PanelError::validation("quantity", format!("'{}' is not a whole number", quantity))
    })?;

    Ok(OrderForm::new(service, link, quantity))
}

/// 逐行讀取指令直到 quit 或輸入結束，錯誤只顯示不中斷
pub async fn run_shell<G, C, S, R, W>(
    session: &mut PanelSession<G, C>,
    storage: &S,
    default_export: &str,
    reader: R,
    out: &mut W,
) -> Result<()>
where
    G: OrderGateway,
    C: CompletionClient,
    S: Storage,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "Type 'help' for commands.")?;
    let mut lines = reader.lines();

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "⚠️ {}", e.user_friendly_message())?;
                continue;
            }
        };

        if command == ShellCommand::Quit {
            break;
        }
        execute(session, storage, default_export, command, out).await?;
    }

    writeln!(out, "Session ended with {} order(s).", session.ledger().len())?;
    Ok(())
}

async fn execute<G, C, S, W>(
    session: &mut PanelSession<G, C>,
    storage: &S,
    default_export: &str,
    command: ShellCommand,
    out: &mut W,
) -> Result<()>
where
    G: OrderGateway,
    C: CompletionClient,
    S: Storage,
    W: Write,
{
    match command {
        ShellCommand::Help => writeln!(out, "{}", HELP)?,
        ShellCommand::Services => print_services(session, out)?,
        ShellCommand::History => print_history(session, out)?,
        ShellCommand::Suggest(text) => match session.suggest(&text).await {
            Ok(suggestion) => writeln!(out, "🤖 Suggestion: {}", suggestion)?,
            Err(e) => writeln!(out, "❌ {}", e.user_friendly_message())?,
        },
        ShellCommand::Order(form) => match session.submit(&form).await {
            Ok(record) => writeln!(
                out,
                "✅ Order {} placed: {} x{} for {} (cost {})",
                record.order_id,
                record.service,
                record.quantity,
                record.link,
                format_cost(record.cost)
            )?,
            Err(e @ PanelError::ValidationError { .. }) => {
                writeln!(out, "⚠️ {}", e.user_friendly_message())?
            }
            Err(e) => writeln!(out, "❌ {}", e.user_friendly_message())?,
        },
        ShellCommand::Export(filename) => {
            let filename = filename.as_deref().unwrap_or(default_export);
            match session.export_csv(storage, filename).await {
                Ok(path) => writeln!(
                    out,
                    "📁 Exported {} order(s) to {}",
                    session.ledger().len(),
                    path
                )?,
                Err(e) => writeln!(out, "❌ {}", e.user_friendly_message())?,
            }
        }
        ShellCommand::Quit => {}
    }
    Ok(())
}

pub fn print_services<G, C, W>(session: &PanelSession<G, C>, out: &mut W) -> Result<()>
where
    G: OrderGateway,
    C: CompletionClient,
    W: Write,
{
    for entry in session.catalog().entries() {
        let price = entry
            .price_per_1k
            .map(|p| format!("{:.2} / 1K", p))
            .unwrap_or_else(|| "unpriced".to_string());
        writeln!(out, "{:<28} id {:<8} {}", entry.name, entry.service_id, price)?;
    }
    Ok(())
}

pub fn print_history<G, C, W>(session: &PanelSession<G, C>, out: &mut W) -> Result<()>
where
    G: OrderGateway,
    C: CompletionClient,
    W: Write,
{
    let ledger = session.ledger();
    if ledger.is_empty() {
        writeln!(out, "No orders yet.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<20} {:<24} {:<28} {:>8} {:<12} {:>8}",
        "Time", "Service", "Link", "Quantity", "Order ID", "Cost"
    )?;
    for record in ledger.records() {
        writeln!(
            out,
            "{:<20} {:<24} {:<28} {:>8} {:<12} {:>8}",
            record.timestamp.format(TIMESTAMP_FORMAT),
            record.service,
            record.link,
            record.quantity,
            record.order_id,
            format_cost(record.cost)
        )?;
    }
    writeln!(out, "Total estimated cost: {:.2}", ledger.total_cost())?;
    Ok(())
}

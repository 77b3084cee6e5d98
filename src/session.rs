// Session module: the terminal's state and command dispatch. A session
// owns the scroll-back history, the single current-order slot and the
// busy flag; it knows nothing about how entries are rendered.

use crate::api::{ApiClient, MenuItem, Order, OrderRequest};
use anyhow::Error;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// The six recognized command names, in the order `help` lists them.
pub const COMMANDS: [&str; 6] = ["menu", "info", "order", "status", "clear", "help"];

/// Usage text shown by `help` and by the probe's cheat-sheet.
pub const USAGE: &str = "\
Available commands:
  menu               View our coffee selection
  info               Learn about our shop
  order <coffee>     Place an order
  status             Check on your current order
  clear              Clear the terminal
  help               Show this message";

/// Kind of a history entry; drives the rendering color in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    User,
    System,
    Success,
    Error,
}

/// One block of terminal scroll-back. Entries are immutable once appended
/// and the history is append-only until a `clear` replaces it wholesale.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub kind: EntryKind,
    pub text: String,
    /// Opaque payload attached to the entry (e.g. the order that a
    /// confirmation describes). Never interpreted by the session itself.
    pub data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    fn new(kind: EntryKind, text: impl Into<String>) -> Self {
        Self::with_data(kind, text, None)
    }

    fn with_data(kind: EntryKind, text: impl Into<String>, data: Option<serde_json::Value>) -> Self {
        HistoryEntry {
            kind,
            text: text.into(),
            data,
            created_at: Utc::now(),
        }
    }
}

/// One terminal session: lives as long as the process, discarded on exit.
pub struct Session {
    api: ApiClient,
    customer_name: String,
    history: Vec<HistoryEntry>,
    current_order: Option<Order>,
    busy: bool,
}

impl Session {
    /// Create a session talking to the given API. The customer name sent
    /// with orders is generated once per session.
    pub fn new(api: ApiClient) -> Self {
        let customer_name = format!("terminal-guest-{}", Utc::now().format("%H%M%S"));
        Session {
            api,
            customer_name,
            history: Vec::new(),
            current_order: None,
            busy: false,
        }
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn current_order(&self) -> Option<&Order> {
        self.current_order.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Submit one input line. The whole line is lower-cased before parsing,
    /// so order searches are case-insensitive by construction (and the echo
    /// loses the original casing, deliberately).
    ///
    /// Every non-empty line appends the user echo first; dispatch then
    /// appends exactly one result entry, success or failure.
    pub fn submit(&mut self, line: &str) {
        let line = line.trim().to_lowercase();
        if line.is_empty() {
            return;
        }

        self.busy = true;
        self.history.push(HistoryEntry::new(EntryKind::User, line.clone()));

        let mut tokens = line.split_whitespace();
        let command = tokens.next().unwrap_or_default();
        let args: Vec<&str> = tokens.collect();

        let entry = self.dispatch(command, &args);
        self.history.push(entry);
        self.busy = false;
    }

    fn dispatch(&mut self, command: &str, args: &[&str]) -> HistoryEntry {
        debug!(command, ?args, "dispatching command");
        match command {
            "help" => HistoryEntry::new(EntryKind::System, USAGE),
            "clear" => {
                // Drops the echo entry too: after clear the history holds
                // exactly one informational entry.
                self.history.clear();
                HistoryEntry::new(EntryKind::System, "Terminal cleared.")
            }
            "menu" => match self.api.menu() {
                Ok(items) => HistoryEntry::with_data(
                    EntryKind::Success,
                    render_menu(&items),
                    serde_json::to_value(&items).ok(),
                ),
                Err(e) => error_entry(&e),
            },
            "info" => match self.api.info() {
                Ok(info) => HistoryEntry::new(EntryKind::Success, render_info(&info)),
                Err(e) => error_entry(&e),
            },
            "order" => self.handle_order(args),
            "status" => self.handle_status(),
            other => HistoryEntry::new(
                EntryKind::Error,
                format!("Unknown command: '{other}'. Type 'help' to see available commands."),
            ),
        }
    }

    fn handle_order(&mut self, args: &[&str]) -> HistoryEntry {
        if args.is_empty() {
            return HistoryEntry::new(
                EntryKind::Error,
                "Please name a coffee. Usage: order <coffee name>",
            );
        }
        let query = args.join(" ");

        let items = match self.api.menu() {
            Ok(items) => items,
            Err(e) => return error_entry(&e),
        };
        let Some(item) = find_item(&items, &query) else {
            return HistoryEntry::new(
                EntryKind::Error,
                format!("No coffee matching '{query}' on the menu. Type 'menu' to see what we brew."),
            );
        };

        let request = OrderRequest {
            customer_name: self.customer_name.clone(),
            coffee_id: item.id.clone(),
            quantity: 1,
        };
        match self.api.place_order(&request) {
            Ok(order) => {
                let text = format!(
                    "Order placed!\n  [{}] {} - ${:.2}\n  Status: {}\nType 'status' to check on it.",
                    order.id,
                    order.coffee_name,
                    order.total_price,
                    order.status.to_uppercase()
                );
                let data = serde_json::to_value(&order).ok();
                self.current_order = Some(order);
                HistoryEntry::with_data(EntryKind::Success, text, data)
            }
            Err(e) => error_entry(&e),
        }
    }

    fn handle_status(&mut self) -> HistoryEntry {
        // No order yet is informational, not an error, and needs no request.
        let Some(current) = &self.current_order else {
            return HistoryEntry::new(
                EntryKind::System,
                "No order yet. Type 'order <coffee name>' to place one.",
            );
        };
        match self.api.order(&current.id) {
            Ok(order) => {
                let placed_at = order
                    .timestamp
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                    .unwrap_or_else(|| "unknown".into());
                let text = format!(
                    "Order [{}]\n  {} - ${:.2}\n  Status: {}\n  Placed at: {}",
                    order.id,
                    order.coffee_name,
                    order.total_price,
                    order.status.to_uppercase(),
                    placed_at
                );
                HistoryEntry::with_data(EntryKind::Success, text, serde_json::to_value(&order).ok())
            }
            Err(e) => error_entry(&e),
        }
    }
}

/// First menu item whose lower-cased name or origin contains `query`.
/// No ranking, no disambiguation: API order wins.
fn find_item<'a>(items: &'a [MenuItem], query: &str) -> Option<&'a MenuItem> {
    items
        .iter()
        .find(|i| i.name.to_lowercase().contains(query) || i.origin.to_lowercase().contains(query))
}

fn render_menu(items: &[MenuItem]) -> String {
    let mut out = String::from("OUR COFFEE SELECTION\n");
    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} - ${:.2}\n   Origin: {}\n   {}\n",
            i + 1,
            item.name,
            item.price,
            item.origin,
            item.description
        ));
    }
    out.push_str("\nType 'order <coffee name>' to place an order.");
    out
}

fn render_info(info: &crate::api::ShopInfo) -> String {
    format!(
        "{}\n{}\n\nLocation: {}\nHours: {}\n\n{}",
        info.name, info.description, info.location, info.hours, info.philosophy
    )
}

fn error_entry(err: &Error) -> HistoryEntry {
    warn!(error = %err, "command failed");
    HistoryEntry::new(EntryKind::Error, format!("Error: {err}"))
}

//! Command handling and the panel refresh driven by the shell.

use std::time::Instant;

use chrono::{Datelike, Local, NaiveDate};
use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use thiserror::Error;
use tracing::info;

use crate::cli::io as cli_io;
use crate::cli::notify::{Notifier, Severity};
use crate::cli::output::{self, MessageKind, OutputPreferences};
use crate::cli::render;
use crate::config::{Config, ConfigManager};
use crate::core::chart;
use crate::core::export;
use crate::core::filter::{self, KindFilter, MonthFilter};
use crate::core::store::TransactionStore;
use crate::core::summary;
use crate::domain::{CategoryRegistry, Transaction, TransactionDraft, TransactionKind};
use crate::errors::StoreError;
use crate::storage::JsonFileStore;
use crate::utils;

/// How the shell is being driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Whether the command loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Errors that abort the whole shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors reported for a single command without leaving the loop.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),
}

pub type CommandResult = Result<(), CommandError>;

/// Command table used for help, completion and suggestions.
pub const COMMANDS: &[(&str, &str)] = &[
    ("add", "Record a transaction: add <income|expense> <category> <amount> [description] [date]"),
    ("edit", "Rewrite a transaction: edit <id> [<kind> <category> <amount> [description] [date]]"),
    ("delete", "Delete a transaction: delete <id>"),
    ("list", "Show the filtered transaction table"),
    ("filter", "Set the view filter: filter <all|income|expense> [all|YYYY-MM]"),
    ("months", "List the months that have records"),
    ("summary", "Show balances and the expense breakdown"),
    ("chart", "Show the expense breakdown alone"),
    ("export", "Write the CSV export file"),
    ("clear", "Delete every transaction"),
    ("version", "Print the application version"),
    ("help", "Show this help"),
    ("exit", "Leave the shell"),
];

pub fn command_names() -> Vec<&'static str> {
    COMMANDS.iter().map(|(name, _)| *name).collect()
}

pub struct App {
    store: TransactionStore,
    registry: &'static CategoryRegistry,
    config: Config,
    notifier: Notifier,
    kind_filter: KindFilter,
    month_filter: MonthFilter,
    mode: CliMode,
    theme: ColorfulTheme,
}

impl App {
    /// Opens the store under the data directory and loads configuration.
    ///
    /// A missing config file is written back with defaults so users have a
    /// file to edit; an unreadable one is reported and replaced by defaults
    /// in memory without touching the disk copy.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        if mode == CliMode::Script {
            output::set_preferences(OutputPreferences {
                plain_mode: true,
                quiet_mode: true,
            });
        }
        let manager = ConfigManager::new();
        let config = match manager.load() {
            Ok(config) => config,
            Err(err) => {
                output::print(
                    MessageKind::Warning,
                    format!("config unreadable, using defaults: {err}"),
                );
                Config::default()
            }
        };
        if !manager.path().exists() {
            manager.save(&config)?;
        }
        let blob = JsonFileStore::open(utils::store_dir())?;
        let store = TransactionStore::open(Box::new(blob))?;
        info!(records = store.len(), mode = ?mode, "session opened");
        Ok(Self {
            notifier: Notifier::new(config.notification_limit),
            store,
            registry: CategoryRegistry::global(),
            config,
            kind_filter: KindFilter::All,
            month_filter: MonthFilter::All,
            mode,
            theme: ColorfulTheme::default(),
        })
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    /// Prompt string showing the record count.
    pub fn prompt(&self) -> String {
        let arrow = if output::current_preferences().plain_mode {
            ">"
        } else {
            "⮞"
        };
        format!("money-manager [{}] {} ", self.store.len(), arrow)
    }

    pub fn confirm_exit(&self) -> bool {
        if self.mode == CliMode::Script {
            return true;
        }
        cli_io::confirm_action(&self.theme, "Exit money-manager?", true).unwrap_or(true)
    }

    /// Runs one parsed command line.
    pub fn dispatch(&mut self, command: &str, args: &[String]) -> Result<LoopControl, CommandError> {
        match command {
            "add" => self.cmd_add(args)?,
            "edit" => self.cmd_edit(args)?,
            "delete" | "remove" => self.cmd_delete(args)?,
            "list" | "ls" => self.cmd_list(),
            "filter" => self.cmd_filter(args)?,
            "months" => self.cmd_months(),
            "summary" => self.cmd_summary(),
            "chart" => self.cmd_chart(),
            "export" => self.cmd_export()?,
            "clear" => self.cmd_clear()?,
            "version" => self.cmd_version(),
            "help" => self.cmd_help(),
            "exit" | "quit" => return Ok(LoopControl::Exit),
            unknown => self.suggest_command(unknown),
        }
        Ok(LoopControl::Continue)
    }

    fn suggest_command(&self, input: &str) {
        output::print(
            MessageKind::Warning,
            format!("Unknown command `{input}`. Type `help` to see available commands."),
        );
        let mut suggestions: Vec<_> = COMMANDS
            .iter()
            .map(|(name, _)| (levenshtein(name, input), *name))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);
        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                output::print(MessageKind::Info, format!("Suggestion: `{best}`?"));
            }
        }
    }

    fn cmd_add(&mut self, args: &[String]) -> CommandResult {
        let draft = if args.is_empty() {
            if self.mode == CliMode::Script {
                return Err(CommandError::InvalidArguments(
                    "usage: add <income|expense> <category> <amount> [description] [YYYY-MM-DD]"
                        .to_string(),
                ));
            }
            self.draft_wizard(None)?
        } else {
            self.draft_from_args(args)?
        };
        let record = self.store.add(draft)?;
        info!(id = record.id, "transaction added");
        self.note("取引を記録しました", Severity::Success);
        self.refresh();
        Ok(())
    }

    fn cmd_edit(&mut self, args: &[String]) -> CommandResult {
        let Some(raw_id) = args.first() else {
            return Err(CommandError::InvalidArguments(
                "usage: edit <id> [<kind> <category> <amount> [description] [date]]".to_string(),
            ));
        };
        let id = parse_id(raw_id)?;
        let base = self
            .store
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound(id))?;
        let draft = if args.len() > 1 {
            self.draft_from_args(&args[1..])?
        } else {
            if self.mode == CliMode::Script {
                return Err(CommandError::InvalidArguments(
                    "script mode edit needs the full field list".to_string(),
                ));
            }
            self.draft_wizard(Some(&base))?
        };
        self.store.update(id, draft)?;
        info!(id, "transaction updated");
        self.note("取引を更新しました", Severity::Success);
        self.refresh();
        Ok(())
    }

    fn cmd_delete(&mut self, args: &[String]) -> CommandResult {
        let Some(raw_id) = args.first() else {
            return Err(CommandError::InvalidArguments("usage: delete <id>".to_string()));
        };
        let id = parse_id(raw_id)?;
        if self.mode == CliMode::Interactive
            && !cli_io::confirm_action(&self.theme, "この取引を削除しますか？", false)?
        {
            output::print(MessageKind::Info, "削除を取り消しました");
            return Ok(());
        }
        let removed = self.store.remove(id)?;
        if removed == 0 {
            output::print(MessageKind::Warning, format!("no transaction with id {id}"));
        } else {
            info!(id, "transaction deleted");
            self.note("取引を削除しました", Severity::Info);
        }
        self.refresh();
        Ok(())
    }

    fn cmd_list(&self) {
        let rows = filter::apply(self.store.records(), self.kind_filter, self.month_filter);
        output::print(MessageKind::Section, "取引履歴");
        println!("{}", render::transaction_panel(&rows, self.registry));
    }

    fn cmd_filter(&mut self, args: &[String]) -> CommandResult {
        if args.is_empty() {
            output::print(
                MessageKind::Info,
                format!(
                    "フィルタ: {} / {}",
                    self.kind_filter.label(),
                    self.month_filter.label()
                ),
            );
            return Ok(());
        }
        self.kind_filter = KindFilter::parse(&args[0]).map_err(CommandError::InvalidArguments)?;
        if let Some(raw) = args.get(1) {
            self.month_filter = MonthFilter::parse(raw).map_err(CommandError::InvalidArguments)?;
        }
        info!(
            kind = self.kind_filter.label(),
            month = %self.month_filter.label(),
            "filter changed"
        );
        self.cmd_list();
        Ok(())
    }

    fn cmd_months(&self) {
        let months = filter::available_months(self.store.records(), today());
        output::print(MessageKind::Section, "月の一覧");
        println!("{}", render::months_panel(&months, self.month_filter));
    }

    fn cmd_summary(&self) {
        output::print(MessageKind::Section, "収支サマリー");
        println!("{}", render::summary_panel(self.store.records(), today()));
        output::print(MessageKind::Section, "今月の支出内訳");
        println!("{}", self.chart_text(today()));
    }

    fn cmd_chart(&self) {
        output::print(MessageKind::Section, "今月の支出内訳");
        println!("{}", self.chart_text(today()));
    }

    fn cmd_export(&mut self) -> CommandResult {
        let dir = self
            .config
            .export_dir
            .clone()
            .unwrap_or_else(utils::export_dir);
        let path = export::write_csv(self.store.records(), self.registry, &dir, today())?;
        info!(path = %path.display(), records = self.store.len(), "csv exported");
        self.note("CSVファイルを保存しました", Severity::Success);
        output::print(MessageKind::Info, format!("-> {}", path.display()));
        Ok(())
    }

    fn cmd_clear(&mut self) -> CommandResult {
        if self.store.is_empty() {
            output::print(MessageKind::Info, render::EMPTY_LIST_PLACEHOLDER);
            return Ok(());
        }
        if self.mode == CliMode::Interactive
            && !cli_io::confirm_action(
                &self.theme,
                "すべての取引を削除しますか？この操作は取り消せません。",
                false,
            )?
        {
            output::print(MessageKind::Info, "削除を取り消しました");
            return Ok(());
        }
        self.store.clear()?;
        info!("all transactions cleared");
        self.note("すべての取引を削除しました", Severity::Info);
        self.refresh();
        Ok(())
    }

    fn cmd_version(&self) {
        output::print(
            MessageKind::Info,
            format!("money_manager {}", env!("CARGO_PKG_VERSION")),
        );
    }

    fn cmd_help(&self) {
        output::print(MessageKind::Section, "commands");
        let width = COMMANDS.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        for (name, description) in COMMANDS {
            println!("  {name:<width$}  {description}");
        }
    }

    /// Parses `<kind> <category> <amount> [description] [date]`.
    fn draft_from_args(&self, args: &[String]) -> Result<TransactionDraft, CommandError> {
        if args.len() < 3 {
            return Err(CommandError::InvalidArguments(
                "expected <income|expense> <category> <amount> [description] [YYYY-MM-DD]"
                    .to_string(),
            ));
        }
        let kind = args[0]
            .parse::<TransactionKind>()
            .map_err(CommandError::InvalidArguments)?;
        let amount: f64 = args[2].parse().map_err(|_| {
            CommandError::InvalidArguments(format!("amount must be a number, got `{}`", args[2]))
        })?;
        let draft = TransactionDraft {
            kind,
            category: args[1].clone(),
            amount,
            description: args.get(3).cloned().unwrap_or_default(),
            date: match args.get(4) {
                Some(raw) => parse_date(raw)?,
                None => today(),
            },
        };
        draft
            .validate(self.registry)
            .map_err(CommandError::InvalidArguments)?;
        Ok(draft)
    }

    /// Interactive form mirroring the original entry panel. When `base` is
    /// given its values seed the prompts; picking a different kind drops the
    /// old category instead of carrying an invalid one over.
    fn draft_wizard(&self, base: Option<&Transaction>) -> Result<TransactionDraft, CommandError> {
        let kinds = [TransactionKind::Income, TransactionKind::Expense];
        let kind_items: Vec<String> = kinds.iter().map(|k| k.label().to_string()).collect();
        let kind_default = base
            .and_then(|t| kinds.iter().position(|k| *k == t.kind))
            .unwrap_or(0);
        let kind = kinds[cli_io::prompt_select(&self.theme, "タイプ", &kind_items, kind_default)?];

        let categories = self.registry.categories_for(kind);
        let category_items: Vec<String> =
            categories.iter().map(|c| c.label.to_string()).collect();
        let category_default = base
            .filter(|t| t.kind == kind)
            .and_then(|t| categories.iter().position(|c| c.code == t.category))
            .unwrap_or(0);
        let selected =
            cli_io::prompt_select(&self.theme, "カテゴリ", &category_items, category_default)?;
        let category = categories[selected].code.to_string();

        let amount = loop {
            let initial = base.map(|t| t.amount.to_string());
            let raw = cli_io::prompt_text(&self.theme, "金額", initial.as_deref())?;
            match raw.trim().parse::<f64>() {
                Ok(value) if value.is_finite() && value >= 0.0 => break value,
                _ => output::print(MessageKind::Warning, "金額は0以上の数値で入力してください"),
            }
        };

        let description =
            cli_io::prompt_text(&self.theme, "説明 (空欄可)", base.map(|t| t.description.as_str()))?;

        let date = loop {
            let initial = base
                .map(|t| t.date.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| today().format("%Y-%m-%d").to_string());
            let raw = cli_io::prompt_text(&self.theme, "日付 (YYYY-MM-DD)", Some(&initial))?;
            match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
                Ok(date) => break date,
                Err(_) => output::print(MessageKind::Warning, "日付はYYYY-MM-DD形式で入力してください"),
            }
        };

        Ok(TransactionDraft {
            kind,
            category,
            amount,
            description: description.trim().to_string(),
            date,
        })
    }

    fn chart_text(&self, today: NaiveDate) -> String {
        let breakdown = summary::category_breakdown(
            self.store.records(),
            TransactionKind::Expense,
            today.year(),
            today.month(),
            self.registry,
        );
        render::chart_panel(&chart::sectors(&breakdown))
    }

    /// Records a transient notification and prints it immediately.
    fn note(&mut self, message: &str, severity: Severity) {
        self.notifier.push(message, severity);
        let kind = match severity {
            Severity::Success => MessageKind::Success,
            Severity::Info => MessageKind::Info,
        };
        output::print(kind, message);
    }

    /// Re-renders every panel after a mutation, the way the original UI
    /// repainted the whole page on each change.
    fn refresh(&mut self) {
        let today = today();
        output::print(MessageKind::Section, "収支サマリー");
        println!("{}", render::summary_panel(self.store.records(), today));
        self.cmd_list();
        output::print(MessageKind::Section, "今月の支出内訳");
        println!("{}", self.chart_text(today));
        self.notifier.sweep(Instant::now());
        if let Some(panel) = render::notifications_panel(&self.notifier.live()) {
            output::separator();
            println!("{panel}");
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn parse_id(raw: &str) -> Result<i64, CommandError> {
    raw.trim()
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("id must be an integer, got `{raw}`")))
}

fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("date must look like 2024-01-05, got `{raw}`"))
    })
}

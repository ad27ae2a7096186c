//! Command-line interface for waybar-styler.
//!
//! Every command loads the bar documents into a [`Session`], applies its
//! edits through the reducer, and saves only when something changed.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use waybar_styler::catalog::{BASE_MODULES, icon_hint};
use waybar_styler::config::{AppContext, AppPaths};
use waybar_styler::constants::validation;
use waybar_styler::error::ContractError;
use waybar_styler::notice::Notice;
use waybar_styler::persistence::{self, Documents};
use waybar_styler::reconcile::{Fill, StyleRow, StyleTarget, WorkspaceRole};
use waybar_styler::session::{Edit, Session};
use waybar_styler::themes;
use waybar_styler::zones::Zone;

/// waybar-styler - Edit bar zones and module styles without losing comments
#[derive(Parser)]
#[command(name = "waybar-styler")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print the documents that would be written instead of saving them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Restart the bar after saving
    #[arg(long, global = true)]
    pub restart: bool,

    /// Start from the saved default setup instead of the current stylesheet
    #[arg(long, global = true)]
    pub apply_default: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List zones with their modules, and styled modules outside any zone
    Modules,

    /// Show the style of every known module
    Styles,

    /// Enable a module in its zone
    Enable { module: String },

    /// Disable a module, keeping it in its zone as a comment
    Disable { module: String },

    /// Move a module to a zone, or out of every zone with `none`
    Assign {
        module: String,
        #[arg(value_parser = parse_zone)]
        zone: ZoneChoice,
    },

    /// Change background, opacity, radius or text color of a module
    Style {
        module: String,

        /// Workspaces part to edit (container, button, active)
        #[arg(long, value_parser = parse_role)]
        role: Option<WorkspaceRole>,

        /// Background color (#rgb or #rrggbb)
        #[arg(long, value_name = "HEX")]
        bg: Option<String>,

        /// Background opacity in percent
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=validation::MAX_OPACITY_PERCENT as i64))]
        opacity: Option<u8>,

        /// Corner radius in pixels
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=validation::MAX_RADIUS as i64))]
        radius: Option<u8>,

        /// Text color (#rgb or #rrggbb)
        #[arg(long, value_name = "HEX")]
        text: Option<String>,
    },

    /// Copy a module's background, opacity and radius onto every other module
    ApplyToAll {
        module: String,

        /// Workspaces part to copy from
        #[arg(long, value_parser = parse_role)]
        role: Option<WorkspaceRole>,
    },

    /// Built-in and saved themes
    Theme {
        #[command(subcommand)]
        action: ThemeCommand,
    },

    /// Print the stylesheet as it would be saved
    Preview,

    /// Restore the documents backed up on first run
    Restore,

    /// Set the interface language
    Language { code: String },
}

#[derive(Subcommand)]
pub enum ThemeCommand {
    /// List built-in and user themes
    List,
    /// Replace the stylesheet with a theme
    Apply { name: String },
    /// Save the current stylesheet as a user theme
    Save { name: String },
    /// Save the current stylesheet as the default setup
    Default,
}

/// Target zone of `assign`; `None` removes the module from every zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneChoice(pub Option<Zone>);

fn parse_zone(s: &str) -> Result<ZoneChoice, ContractError> {
    if s.trim().eq_ignore_ascii_case("none") {
        return Ok(ZoneChoice(None));
    }
    s.parse().map(|zone| ZoneChoice(Some(zone)))
}

fn parse_role(s: &str) -> Result<WorkspaceRole, ContractError> {
    s.parse()
}

/// Process CLI arguments and run the command
pub fn process_cli() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = AppContext::load(AppPaths::resolve());
    run(&cli, &mut ctx)
}

pub fn run(cli: &Cli, ctx: &mut AppContext) -> Result<()> {
    match &cli.command {
        Commands::Restore => return restore(cli, ctx),
        Commands::Language { code } => {
            ctx.set_language(code)?;
            println!("{}: {}", ctx.tr("Language applied"), ctx.settings.language);
            return Ok(());
        }
        Commands::Theme {
            action: ThemeCommand::List,
        } => return list_themes(ctx),
        _ => {}
    }

    if !cli.dry_run && persistence::ensure_backup(&ctx.paths)? {
        println!("{}", ctx.tr("Original files backed up"));
    }

    let documents = persistence::load_documents(&ctx.paths);
    report(ctx, &documents.notices);

    let mut session = Session::load(documents.config.as_str(), documents.stylesheet.as_str());
    if cli.apply_default {
        session = themes::auto_apply_default(&ctx.paths, &session);
    }

    let session = match &cli.command {
        Commands::Modules => {
            print_modules(&session);
            session
        }
        Commands::Styles => {
            print_styles(ctx, &session);
            session
        }
        Commands::Preview => {
            print!("{}", session.preview_stylesheet());
            session
        }
        Commands::Enable { module } => session.apply(Edit::SetEnabled {
            module: module.clone(),
            enabled: true,
        }),
        Commands::Disable { module } => session.apply(Edit::SetEnabled {
            module: module.clone(),
            enabled: false,
        }),
        Commands::Assign { module, zone } => {
            known_or_catalog(&session, module)?;
            session.apply(Edit::AssignZone {
                module: module.clone(),
                zone: zone.0,
            })
        }
        Commands::Style {
            module,
            role,
            bg,
            opacity,
            radius,
            text,
        } => {
            let target = style_target(&session, module, *role)?;
            style(&session, target, bg.as_deref(), *opacity, *radius, text.as_deref())
        }
        Commands::ApplyToAll { module, role } => {
            let source = style_target(&session, module, *role)?;
            session.apply(Edit::ApplyToAll { source })
        }
        Commands::Theme { action } => match action {
            ThemeCommand::Apply { name } => themes::apply(&ctx.paths, &session, name)?,
            ThemeCommand::Save { name } => {
                let path = themes::save_user_theme(&ctx.paths, name, session.stylesheet_text())?;
                println!("{}: {}", ctx.tr("Saved theme"), path.display());
                session
            }
            ThemeCommand::Default => {
                themes::save_default(&ctx.paths, session.stylesheet_text())?;
                println!("{}", ctx.tr("Default setup saved"));
                session
            }
            ThemeCommand::List => session,
        },
        Commands::Restore | Commands::Language { .. } => session,
    };

    report(ctx, session.notices());
    finish(cli, ctx, &documents, &session)
}

/// Save the session if it changed, or print it on a dry run
fn finish(cli: &Cli, ctx: &AppContext, loaded: &Documents, session: &Session) -> Result<()> {
    if !session.differs_from(&loaded.config, &loaded.stylesheet) {
        info!("No changes to save");
        return Ok(());
    }

    let (config, stylesheet) = session.documents();
    if cli.dry_run {
        if config != loaded.config {
            println!("--- {}", ctx.paths.config_file().display());
            print!("{config}");
        }
        if stylesheet != loaded.stylesheet {
            println!("--- {}", ctx.paths.style_file().display());
            print!("{stylesheet}");
        }
        return Ok(());
    }

    persistence::save_documents(&ctx.paths, loaded, config, stylesheet)?;
    println!("{}", ctx.tr("Saved"));
    if cli.restart {
        persistence::restart_bar()?;
    }
    Ok(())
}

fn restore(cli: &Cli, ctx: &AppContext) -> Result<()> {
    if cli.dry_run {
        println!("{}: {}", ctx.tr("Would restore"), ctx.paths.waybar_dir.display());
        return Ok(());
    }
    let restored = persistence::restore_backup(&ctx.paths)?;
    if restored == 0 {
        bail!("{}", ctx.tr("No backups found"));
    }
    println!("{}", ctx.tr("Defaults restored"));
    if cli.restart {
        persistence::restart_bar()?;
    }
    Ok(())
}

fn list_themes(ctx: &AppContext) -> Result<()> {
    println!("{}:", ctx.tr("Built-in themes"));
    for theme in themes::BUILTIN_THEMES {
        println!("  {}", theme.name);
    }

    println!("{}:", ctx.tr("User themes"));
    let user = themes::list_user_themes(&ctx.paths)?;
    if user.is_empty() {
        println!("  {}", ctx.tr("(no user themes yet)"));
    }
    for name in user {
        println!("  {name}");
    }
    Ok(())
}

fn known_or_catalog(session: &Session, module: &str) -> Result<(), ContractError> {
    if session.known_modules().iter().any(|m| m == module) || BASE_MODULES.contains(&module) {
        Ok(())
    } else {
        Err(ContractError::UnknownModule(module.to_string()))
    }
}

fn style_target(session: &Session, module: &str, role: Option<WorkspaceRole>) -> Result<StyleTarget> {
    known_or_catalog(session, module)?;
    match (StyleTarget::module(module), role) {
        (StyleTarget::Workspaces(_), Some(role)) => Ok(StyleTarget::Workspaces(role)),
        (target, None) => Ok(target),
        (StyleTarget::Module(name), Some(role)) => {
            bail!("--role {role} only applies to the workspaces module, not {name}")
        }
    }
}

fn style(
    session: &Session,
    target: StyleTarget,
    bg: Option<&str>,
    opacity: Option<u8>,
    radius: Option<u8>,
    text: Option<&str>,
) -> Session {
    let mut next = session.clone();

    match (bg, opacity) {
        (Some(hex), opacity) => {
            let opacity_percent = opacity.unwrap_or_else(|| next.fill_of(&target).opacity_percent);
            next = next.apply(Edit::SetBackground {
                target: target.clone(),
                hex: hex.to_string(),
                opacity_percent,
            });
        }
        (None, Some(opacity_percent)) => {
            next = next.apply(Edit::SetOpacity {
                target: target.clone(),
                opacity_percent,
            });
        }
        (None, None) => {}
    }
    if let Some(radius_px) = radius {
        next = next.apply(Edit::SetRadius {
            target: target.clone(),
            radius_px,
        });
    }
    if let Some(hex) = text {
        next = next.apply(Edit::SetTextColor {
            target,
            hex: hex.to_string(),
        });
    }
    next
}

fn report(ctx: &AppContext, notices: &[Notice]) {
    for notice in notices {
        warn!(%notice, "notice");
        eprintln!("{}: {notice}", ctx.tr("Warning"));
    }
}

fn print_modules(session: &Session) {
    let view = session.view();
    for (zone, entries) in &view.zones {
        println!("{zone}:");
        for entry in entries {
            let mark = if entry.enabled { "x" } else { " " };
            println!("  [{mark}] {} {}", icon_hint(&entry.name), entry.name);
        }
    }
    if !view.others.is_empty() {
        println!("other:");
        for name in &view.others {
            println!("      {} {name}", icon_hint(name));
        }
    }
}

fn format_fill(fill: &Fill) -> String {
    format!(
        "bg {} {:>3}%  radius {:>2}px",
        fill.background, fill.opacity_percent, fill.radius_px
    )
}

fn print_styles(ctx: &AppContext, session: &Session) {
    let view = session.view();
    for row in &view.rows {
        let zone = row.zone.map_or("other", Zone::name);
        match &row.style {
            StyleRow::Plain(style) => println!(
                "{:<24} {:<6} {}  text {}",
                row.name,
                zone,
                format_fill(&style.fill),
                style.text
            ),
            StyleRow::Workspaces(style) => {
                println!("{:<24} {:<6} text {}", row.name, zone, style.text);
                for (role, fill) in [
                    (WorkspaceRole::Container, &style.container),
                    (WorkspaceRole::Button, &style.button),
                    (WorkspaceRole::Active, &style.active),
                ] {
                    println!("  {:<22} {:<6} {}", role.name(), "", format_fill(fill));
                }
            }
        }
    }
    report(ctx, &view.notices);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;
    use tempfile::TempDir;

    const CONFIG: &str = "{\n  \"modules-left\": [\n    \"hyprland/workspaces\",\n    \"cpu\"\n  ],\n  \"modules-right\": [\n    \"clock\"\n  ]\n}\n";
    const SHEET: &str = "#cpu {\n  color: #eeeeee;\n}\n";

    fn setup() -> (TempDir, AppContext) {
        let dir = TempDir::new().unwrap();
        let paths = AppPaths::with_root(dir.path());
        persistence::save_documents(&paths, &Documents::default(), CONFIG, SHEET).unwrap();
        (dir, AppContext::load(paths))
    }

    fn run_args(ctx: &mut AppContext, args: &[&str]) -> Result<()> {
        let cli = Cli::try_parse_from(std::iter::once("waybar-styler").chain(args.iter().copied()))?;
        run(&cli, ctx)
    }

    fn documents(ctx: &AppContext) -> Documents {
        persistence::load_documents(&ctx.paths)
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_zone_choice() {
        assert_eq!(parse_zone("none").unwrap(), ZoneChoice(None));
        assert_eq!(parse_zone("Right").unwrap(), ZoneChoice(Some(Zone::Right)));
        assert!(parse_zone("top").is_err());
    }

    #[test]
    fn test_opacity_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["waybar-styler", "style", "cpu", "--opacity", "101"]).is_err());
        assert!(Cli::try_parse_from(["waybar-styler", "style", "cpu", "--radius", "31"]).is_err());
    }

    #[test]
    fn test_disable_then_backup_kept() {
        let (_dir, mut ctx) = setup();
        run_args(&mut ctx, &["disable", "cpu"]).unwrap();

        assert!(documents(&ctx).config.contains("    // \"cpu\"\n"));
        assert_eq!(fs::read_to_string(ctx.paths.config_backup()).unwrap(), CONFIG);
    }

    #[test]
    fn test_style_edits_only_target_block() {
        let (_dir, mut ctx) = setup();
        run_args(&mut ctx, &["style", "clock", "--bg", "#112233", "--opacity", "50", "--radius", "8"]).unwrap();

        let css = documents(&ctx).stylesheet;
        assert!(css.starts_with(SHEET));
        assert!(css.contains("#clock {\n  background-color: rgba(17, 34, 51, 0.50);\n  border-radius: 8px;\n}\n"));
    }

    #[test]
    fn test_role_requires_workspaces_module() {
        let (_dir, mut ctx) = setup();
        assert!(run_args(&mut ctx, &["style", "cpu", "--role", "active", "--radius", "3"]).is_err());
        run_args(&mut ctx, &["style", "hyprland/workspaces", "--role", "active", "--radius", "3"]).unwrap();
        assert!(documents(&ctx).stylesheet.contains("#workspaces button.active {\n  border-radius: 3px;\n}\n"));
    }

    #[test]
    fn test_unknown_module_is_rejected() {
        let (_dir, mut ctx) = setup();
        let err = run_args(&mut ctx, &["assign", "frobnicator", "left"]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ContractError>(),
            Some(&ContractError::UnknownModule("frobnicator".to_string()))
        );
    }

    #[test]
    fn test_style_edit_keeps_undecodable_config() {
        let (_dir, mut ctx) = setup();
        let config = b"{\n  // caf\xe9\n  \"modules-left\": [\"cpu\"]\n}\n".to_vec();
        fs::write(ctx.paths.config_file(), &config).unwrap();

        run_args(&mut ctx, &["style", "cpu", "--text", "#000000"]).unwrap();

        assert_eq!(fs::read(ctx.paths.config_file()).unwrap(), config);
        assert!(documents(&ctx).stylesheet.contains("color: #000000;"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let (_dir, mut ctx) = setup();
        run_args(&mut ctx, &["--dry-run", "assign", "tray", "right"]).unwrap();
        assert_eq!(documents(&ctx).config, CONFIG);
        assert!(!ctx.paths.backup_marker().exists());
    }

    #[test]
    fn test_theme_apply_and_restore() {
        let (_dir, mut ctx) = setup();
        run_args(&mut ctx, &["theme", "apply", "glacier minimal"]).unwrap();
        assert_eq!(documents(&ctx).stylesheet, themes::BUILTIN_THEMES[4].css);

        run_args(&mut ctx, &["restore"]).unwrap();
        assert_eq!(documents(&ctx).stylesheet, SHEET);
    }

    #[test]
    fn test_language_is_persisted() {
        let (_dir, mut ctx) = setup();
        run_args(&mut ctx, &["language", "es"]).unwrap();
        assert_eq!(AppContext::load(ctx.paths.clone()).settings.language, "es");
    }
}

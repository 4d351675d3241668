use anyhow::Result;
use std::time::Duration;
use taskwizard::config::Config;
use taskwizard::constants::MIN_RENDER_WIDTH;
use taskwizard::logger;
use taskwizard::runtime::{Driver, RawModeGuard, TerminalInput};
use taskwizard::tasks::{DependencyRule, FuncTask, InputTask, Item, MultiSelectTask, RuleAction, Task, YesNoTask};
use taskwizard::validation::LengthRange;

fn build_wizard(config: &Config) -> Vec<Box<dyn Task>> {
    let countdown = config.timeouts.countdown();
    let tick = config.timeouts.tick_interval();

    let mut confirm = YesNoTask::new("Setup", "Configure a new project?")
        .with_default(true)
        .with_tick_interval(tick);
    if let Some(duration) = countdown {
        confirm = confirm.with_timeout(duration, true);
    }

    let features = vec![
        Item::new("core", "Core library").with_description("Always required"),
        Item::new("cli", "Command line interface"),
        Item::new("tui", "Terminal UI").with_description("Pulls in the command line interface"),
        Item::new("server", "HTTP server"),
        Item::new("metrics", "Metrics endpoint").with_description("Needs the HTTP server"),
        Item::new("docs", "Documentation").with_description("Not available yet"),
    ];
    let rules = vec![
        DependencyRule::new("tui").on_select(RuleAction::new().force_select(["cli"])),
        DependencyRule::new("server")
            .on_select(RuleAction::new().enable(["metrics"]))
            .on_deselect(RuleAction::new().disable(["metrics"])),
    ];
    let mut select = MultiSelectTask::new("Features", features)
        .with_select_all()
        .with_items_disabled(["docs"])
        .with_default_items(["core", "server"])
        .with_dependencies(rules)
        .with_require_selection(true)
        .with_viewport(config.ui.viewport_size, config.ui.show_counters)
        .with_tick_interval(tick);
    if let Some(duration) = countdown {
        select = select.with_timeout(duration, ["core", "cli"]);
    }

    let mut name = InputTask::new("Project name", "Name:")
        .with_validator(LengthRange { min: 3, max: Some(32) })
        .with_placeholder("my-project")
        .with_tick_interval(tick);
    if let Some(duration) = countdown {
        name = name.with_timeout(duration, "my-project");
    }

    let scaffold = FuncTask::new("Scaffold", || async {
        tokio::time::sleep(Duration::from_millis(800)).await;
        Ok(Some("Created Cargo.toml\nCreated src/main.rs".to_string()))
    })
    .with_language(config.ui.language);

    vec![
        Box::new(confirm),
        Box::new(select),
        Box::new(name),
        Box::new(scaffold),
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--generate-config") {
        let path = Config::get_default_config_path()?;
        Config::generate_default_config(&path)?;
        println!("Configuration written to {}", path.display());
        return Ok(());
    }

    let config = Config::load()?;
    let _logger = logger::init(&config.logging)?;

    let width = crossterm::terminal::size().map(|(w, _)| w).unwrap_or(80).max(MIN_RENDER_WIDTH);
    let mut tasks = build_wizard(&config);

    let results = {
        let _raw = RawModeGuard::enable()?;
        let mut driver = Driver::new(TerminalInput::new(), std::io::stdout())
            .with_renderer(config.ui.renderer())
            .with_locale(config.ui.locale())
            .with_width(width);
        driver.run_queue(&mut tasks).await?
    };

    let failed = results.iter().filter(|result| result.has_error()).count();
    if results.len() < tasks.len() {
        eprintln!("Wizard stopped after {} of {} steps", results.len(), tasks.len());
    } else if failed > 0 {
        eprintln!("Wizard finished with {} warning(s)", failed);
    }

    Ok(())
}

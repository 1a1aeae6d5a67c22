//! Command dispatch

use std::io::{self, Write};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use itertools::Itertools;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{
    set_default_color, CodeLessonView, GridView, Lesson, LessonKind, LessonView, ParameterView,
    Unit, UnitView, VisualLessonView,
};
use crate::infrastructure::traits::FileSystem;
use crate::infrastructure::{InfraError, ServiceContainer};

/// Run the parsed command line.
pub fn execute(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage("no command given, see --help".into()));
    };
    if let Commands::Completion { shell } = command {
        return completion(*shell);
    }

    let settings = Settings::load(cli.config.as_deref())?;
    if let Some(color) = settings.tile_color()? {
        debug!("default tile color: {}", color);
        set_default_color(color);
    }
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Check { file } => check(&container, file),
        Commands::Tree { file } => tree(&container, file),
        Commands::Fmt { file, output } => fmt(&container, file, output.as_deref()),
        Commands::Signature { file, unit, lesson } => signature(&container, file, unit, lesson),
        Commands::Config => show_config(&container),
        Commands::Completion { shell } => completion(*shell),
    }
}

#[instrument(skip(container))]
fn check(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let units = container.catalog().load(file)?;
    let lessons = units.iter().flat_map(|u| u.lessons()).collect::<Vec<_>>();
    let code = lessons.iter().filter(|l| l.is_code()).count();
    output::success(&format!(
        "{}: {} units, {} lessons ({} code, {} visual)",
        file.display(),
        units.len(),
        lessons.len(),
        code,
        lessons.len() - code
    ));
    for unit in &units {
        output::detail(&format!("{}: {} lessons", unit.name(), unit.lessons().len()));
    }
    Ok(())
}

#[instrument(skip(container))]
fn tree(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let units = container.catalog().load(file)?;
    let root = Tree::new(file.display().to_string()).with_leaves(units.iter().map(unit_tree));
    output::info(&root);
    Ok(())
}

fn unit_tree(unit: &Unit) -> Tree<String> {
    Tree::new(unit.name().to_string()).with_leaves(unit.lessons().iter().map(lesson_tree))
}

fn lesson_tree(lesson: &Lesson) -> Tree<String> {
    match lesson {
        Lesson::Code(l) => Tree::new(format!(
            "{} [code] {} {}",
            l.name(),
            l.return_type(),
            l.method_name()
        ))
        .with_leaves(l.parameters().iter().map(|p| Tree::new(p.declaration()))),
        Lesson::Visual(l) => {
            let grids = l
                .starting_grids()
                .iter()
                .enumerate()
                .map(|(i, g)| grid_leaf("start", i, g))
                .chain(
                    l.ending_grids()
                        .iter()
                        .enumerate()
                        .map(|(i, g)| grid_leaf("end", i, g)),
                );
            Tree::new(format!(
                "{} [visual] {}",
                l.name(),
                l.allowed_methods().iter().map(|m| m.name()).join(", ")
            ))
            .with_leaves(grids)
        }
    }
}

fn grid_leaf(label: &str, index: usize, grid: &impl GridView) -> Tree<String> {
    Tree::new(format!(
        "{label}[{index}] {size}x{size}, player ({x}, {y}) facing {dir}",
        size = grid.size(),
        x = grid.player_x(),
        y = grid.player_y(),
        dir = grid.player_direction(),
    ))
}

#[instrument(skip(container))]
fn fmt(container: &ServiceContainer, file: &Path, target: Option<&Path>) -> CliResult<()> {
    if let Some(out) = target {
        ensure_target_dir(container.fs.as_ref(), out)?;
    }
    let catalog = container.catalog();
    let units = catalog.load(file)?;
    match target {
        Some(out) => {
            catalog.save(out, &units)?;
            output::action("Formatted", &out.display());
        }
        None => {
            let text = catalog.render(&units)?;
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{text}").map_err(|e| InfraError::io("write stdout", e))?;
        }
    }
    Ok(())
}

/// The directory `out` would be written into must already exist.
fn ensure_target_dir(fs: &dyn FileSystem, out: &Path) -> CliResult<()> {
    match out.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !fs.exists(dir) => {
            Err(CliError::InvalidArgs(format!(
                "output directory does not exist: {}",
                dir.display()
            )))
        }
        _ => Ok(()),
    }
}

#[instrument(skip(container))]
fn signature(
    container: &ServiceContainer,
    file: &Path,
    unit: &str,
    lesson: &str,
) -> CliResult<()> {
    let units = container.catalog().load(file)?;
    let code = units
        .iter()
        .find(|u| u.name() == unit)
        .ok_or_else(|| CliError::Usage(format!("unit '{unit}' not found")))?
        .lesson(lesson)
        .ok_or_else(|| CliError::Usage(format!("lesson '{lesson}' not found in unit '{unit}'")))?
        .as_code()
        .ok_or_else(|| CliError::Usage(format!("lesson '{lesson}' is not a code lesson")))?;
    output::info(&code.default_starting_code());
    Ok(())
}

fn show_config(container: &ServiceContainer) -> CliResult<()> {
    output::info(&container.settings.to_toml()?);
    Ok(())
}

fn completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

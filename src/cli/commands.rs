//! Command dispatch: each subcommand loads the tree, applies the operation
//! and persists mutations.

use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::render::{self, TreeNodeConvert};
use crate::config::{self, Settings};
use crate::domain::{FamilyTree, PersonDraft, PersonId, PersonUpdate};
use crate::storage::StorageError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let data_file = resolve_data_file(cli)?;

    match &cli.command {
        Some(Commands::Add {
            name,
            birth_year,
            death_year,
            gender,
            birth_date,
            death_date,
            birth_city,
        }) => _add(
            &data_file,
            PersonDraft {
                name: name.clone(),
                birth_year: *birth_year,
                death_year: *death_year,
                gender: gender.clone(),
                birth_date: birth_date.clone(),
                death_date: death_date.clone(),
                birth_city: birth_city.clone(),
            },
        ),
        Some(Commands::Update {
            id,
            name,
            birth_year,
            death_year,
            gender,
            birth_date,
            death_date,
            birth_city,
        }) => _update(
            &data_file,
            *id,
            PersonUpdate {
                name: name.clone(),
                birth_year: *birth_year,
                death_year: *death_year,
                gender: gender.clone(),
                birth_date: birth_date.clone(),
                death_date: death_date.clone(),
                birth_city: birth_city.clone(),
            },
        ),
        Some(Commands::Remove { id }) => _remove(&data_file, *id),
        Some(Commands::Link {
            parent_id,
            child_id,
        }) => _link(&data_file, *parent_id, *child_id),
        Some(Commands::Marry {
            person1_id,
            person2_id,
        }) => _marry(&data_file, *person1_id, *person2_id),
        Some(Commands::List) => _list(&data_file),
        Some(Commands::Show { id }) => _show(&data_file, *id),
        Some(Commands::Find { query }) => _find(&data_file, query),
        Some(Commands::Tree { root }) => _tree(&data_file, *root),
        Some(Commands::Config { command }) => _config(command),
        Some(Commands::Completion { shell }) => _completion(*shell),
        None => Ok(()),
    }
}

/// CLI flag wins over config/env layers.
fn resolve_data_file(cli: &Cli) -> CliResult<PathBuf> {
    if let Some(file) = &cli.file {
        return Ok(file.clone());
    }
    let settings = Settings::load()?;
    Ok(settings.data_file)
}

fn load_tree(path: &Path) -> CliResult<FamilyTree> {
    let mut tree = FamilyTree::new();
    let loaded = tree.load(path)?;
    debug!("data file {:?}: loaded={}, people={}", path, loaded, tree.len());
    Ok(tree)
}

#[instrument]
fn _add(path: &Path, draft: PersonDraft) -> CliResult<()> {
    let mut tree = load_tree(path)?;
    let person = tree.create_person(draft)?;
    let line = format!("Added: {} (ID: {})", person, person.id);
    tree.save(path)?;
    output::success(&line);
    Ok(())
}

#[instrument]
fn _update(path: &Path, id: PersonId, update: PersonUpdate) -> CliResult<()> {
    let mut tree = load_tree(path)?;
    let person = tree.update_person(id, update)?;
    let line = format!("Updated: {}", person);
    tree.save(path)?;
    output::success(&line);
    Ok(())
}

#[instrument]
fn _remove(path: &Path, id: PersonId) -> CliResult<()> {
    let mut tree = load_tree(path)?;
    let removed = tree.remove_person(id)?;
    tree.save(path)?;
    output::success(&format!("Removed: {}", removed));
    Ok(())
}

#[instrument]
fn _link(path: &Path, parent_id: PersonId, child_id: PersonId) -> CliResult<()> {
    let mut tree = load_tree(path)?;
    let (parent, child) = tree.link_parent_child(parent_id, child_id)?;
    let line = format!("{} is now parent of {}", parent.name, child.name);
    tree.save(path)?;
    output::success(&line);
    Ok(())
}

#[instrument]
fn _marry(path: &Path, person1_id: PersonId, person2_id: PersonId) -> CliResult<()> {
    let mut tree = load_tree(path)?;
    let (person1, person2) = tree.link_spouse(person1_id, person2_id)?;
    let line = format!("{} and {} are now spouses", person1.name, person2.name);
    tree.save(path)?;
    output::success(&line);
    Ok(())
}

#[instrument]
fn _list(path: &Path) -> CliResult<()> {
    let tree = load_tree(path)?;
    let people = tree.all_sorted_by_name();
    if people.is_empty() {
        output::info("No family members yet.");
        return Ok(());
    }
    output::header(&render::table_header());
    for person in people {
        output::info(&render::table_row(person));
    }
    Ok(())
}

#[instrument]
fn _show(path: &Path, id: PersonId) -> CliResult<()> {
    let tree = load_tree(path)?;
    let details = tree.details(id)?;

    output::header(&details.person.to_string());
    if let Some(born) = details.person.born() {
        output::detail(&format!("Born: {}", born));
    }
    if let Some(died) = details.person.died() {
        output::detail(&format!("Died: {}", died));
    }
    if let Some(city) = &details.person.birth_city {
        output::detail(&format!("Birthplace: {}", city));
    }

    for (label, people) in [
        ("Parents", &details.parents),
        ("Spouses", &details.spouses),
        ("Children", &details.children),
        ("Siblings", &details.siblings),
    ] {
        if people.is_empty() {
            output::detail(&format!("{}: -", label));
        } else {
            output::detail(&format!("{}: {}", label, render::name_list(people)));
        }
    }
    Ok(())
}

#[instrument]
fn _find(path: &Path, query: &str) -> CliResult<()> {
    let tree = load_tree(path)?;
    let matches = tree.find_by_name(query);
    if matches.is_empty() {
        output::info("No matches.");
        return Ok(());
    }
    output::header(&render::table_header());
    for person in matches {
        output::info(&render::table_row(person));
    }
    Ok(())
}

#[instrument]
fn _tree(path: &Path, root: Option<PersonId>) -> CliResult<()> {
    let tree = load_tree(path)?;
    let forest = tree.build_tree(root)?;
    if forest.is_empty() {
        output::info("No family members yet.");
        return Ok(());
    }
    for node in &forest {
        output::info(&node.to_tree_string());
    }
    Ok(())
}

fn _config(command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load()?;
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match config::global_config_path() {
                Some(path) => output::info(&path.display()),
                None => output::warning("cannot determine config directory"),
            }
            let settings = Settings::load()?;
            output::detail(&format!("data file: {}", settings.data_file.display()));
            Ok(())
        }
        ConfigCommands::Init => _config_init(),
    }
}

fn _config_init() -> CliResult<()> {
    let path = config::global_config_path()
        .ok_or_else(|| CliError::InvalidArgs("cannot determine config directory".to_string()))?;
    if path.exists() {
        output::warning(&format!("config already exists: {}", path.display()));
        return Ok(());
    }
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(StorageError::from)?;
    }
    std::fs::write(&path, Settings::template()).map_err(StorageError::from)?;
    output::success(&format!("created {}", path.display()));
    Ok(())
}

fn _completion(shell: clap_complete::Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
    Ok(())
}

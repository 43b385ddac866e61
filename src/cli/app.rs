//! CLI application handler for the quicknotes application
//!
//! This module renders the note collection as cards, drives the add and edit
//! flows, and gates deletion behind a blocking confirmation prompt.
use std::{
    fs,
    io::{stdin, stdout, Write},
    path::Path,
    process::Command,
};

use chrono::Local;
use console::{style, Color, Style};
use log::{info, warn};
use shell_words::split;
use tempfile::Builder;

use crate::{
    format_timestamp, Commands, Config, EditField, Note, NoteStore, NotesError, Result,
};

/// Blocking yes/no interaction invoked before permanent deletion.
///
/// The console implementation wraps the terminal; tests substitute a canned
/// answer.
pub trait Confirmation {
    /// Asks the user a yes/no question; only an explicit yes confirms.
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Confirmation prompt on the controlling terminal
pub struct ConsoleConfirmation;

impl Confirmation for ConsoleConfirmation {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        print!("{} [y/N]: ", prompt);
        stdout().flush().map_err(NotesError::Io)?;

        let mut input = String::new();
        stdin().read_line(&mut input).map_err(NotesError::Io)?;

        let input = input.trim().to_lowercase();
        Ok(input == "y" || input == "yes")
    }
}

/// CLI application handler - processes CLI commands against the note store
pub struct App {
    /// The note store
    store: NoteStore,

    /// Application configuration
    config: Config,

    /// Whether to display verbose output
    verbose: bool,

    /// Deletion confirmation collaborator
    confirmation: Box<dyn Confirmation>,
}

impl App {
    /// Create a new CLI application over the given store and config
    pub fn new(
        store: NoteStore,
        config: Config,
        verbose: bool,
        confirmation: Box<dyn Confirmation>,
    ) -> Self {
        Self {
            store,
            config,
            verbose,
            confirmation,
        }
    }

    /// Run the CLI application with the given command
    pub fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Add {
                content,
                title,
                category,
                file,
                edit,
            } => self.handle_add(content, title, category, file.as_deref(), edit)?,

            Commands::List { json } => self.handle_list(json)?,

            Commands::Edit {
                id,
                title,
                content,
                category,
                edit,
            } => self.handle_edit(id, title, content, category, edit)?,

            Commands::Delete { id, force } => self.handle_delete(id, force)?,

            Commands::Categories => self.handle_categories(),
        }

        Ok(())
    }

    fn handle_add(
        &mut self,
        content: Option<String>,
        title: Option<String>,
        category: String,
        file: Option<&Path>,
        open_editor: bool,
    ) -> Result<()> {
        // Get content based on the provided options
        let note_content = match (content, file) {
            (Some(c), _) => c,
            (_, Some(file_path)) => {
                if !file_path.exists() {
                    return Err(NotesError::FileNotFound {
                        file_path: file_path.display().to_string(),
                    });
                }
                fs::read_to_string(file_path)?
            }
            (None, None) => {
                if open_editor {
                    self.open_editor_with_content("")?
                } else {
                    String::new()
                }
            }
        };

        if !self.store.categories().contains(&category) {
            warn!(
                "Category '{}' is not in the fixed set; it will render with the default colors",
                category
            );
        }

        if let Some(title) = title {
            self.store.set_draft_title(&title);
        }
        self.store.set_draft_content(&note_content);
        self.store.set_draft_category(&category);

        match self.store.add_note()? {
            Some(id) => println!("Note created with ID: {}", id),
            None => println!("Note content is empty; nothing was added."),
        }
        Ok(())
    }

    fn handle_list(&self, json: bool) -> Result<()> {
        let notes = self.store.notes();

        if json {
            println!("{}", serde_json::to_string_pretty(notes)?);
            return Ok(());
        }

        if notes.is_empty() {
            println!("No notes yet, add your first note.");
            return Ok(());
        }

        // Use terminal width for formatting if available
        let term_width = terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(80);

        for (i, note) in notes.iter().enumerate() {
            // Add separator between notes (except before the first)
            if i > 0 {
                println!("{}", "-".repeat(term_width.min(50)));
            }
            self.print_card(note);
        }

        println!(
            "\n{} note{}",
            notes.len(),
            if notes.len() == 1 { "" } else { "s" }
        );
        if self.verbose {
            println!("Data directory: {}", self.config.data_dir.display());
        }
        Ok(())
    }

    /// Print a single note as a card: category badge, title, content,
    /// timestamp footer.
    fn print_card(&self, note: &Note) {
        let meta = self.store.categories().resolve(&note.category);
        let accent = hex_to_color256(&meta.accent).unwrap_or(Color::Cyan);
        let badge = Style::new().bg(accent).white().bold();

        // The badge shows the stored label even when it resolves to the
        // default colors.
        println!(
            "{} {}",
            badge.apply_to(format!(" {} ", note.category)),
            style(format!("ID: {}", note.id)).dim()
        );

        if let Some(title) = &note.title {
            println!("{}", style(title).bold());
        }
        println!("{}", note.content);

        let mut footer = format!(
            "Created: {}",
            format_timestamp(&note.created_at.with_timezone(&Local))
        );
        if let Some(updated) = note.updated_at {
            footer.push_str(&format!(
                " | Updated: {}",
                format_timestamp(&updated.with_timezone(&Local))
            ));
        }
        println!("{}", style(footer).dim());
    }

    fn handle_edit(
        &mut self,
        id: i64,
        title: Option<String>,
        content: Option<String>,
        category: Option<String>,
        open_editor: bool,
    ) -> Result<()> {
        self.store.open_for_edit(id)?;

        if let Some(new_title) = title {
            self.store.update_edit(EditField::Title, &new_title);
        }
        if let Some(new_content) = content {
            self.store.update_edit(EditField::Content, &new_content);
        }
        if let Some(new_category) = category {
            if !self.store.categories().contains(&new_category) {
                warn!(
                    "Category '{}' is not in the fixed set; it will render with the default colors",
                    new_category
                );
            }
            self.store.update_edit(EditField::Category, &new_category);
        }

        if open_editor {
            let current = self
                .store
                .open_note()
                .map(|note| note.content.clone())
                .unwrap_or_default();
            let edited = self.open_editor_with_content(&current)?;
            self.store.update_edit(EditField::Content, &edited);
        }

        if self.store.save_edit()? {
            println!("Note {} updated successfully", id);
        } else {
            // The buffer stays open on an empty-content save; discard it,
            // the CLI has no modal to return to.
            self.store.close_edit();
            println!("Note content is empty; changes were not saved.");
        }
        Ok(())
    }

    fn handle_delete(&mut self, id: i64, force: bool) -> Result<()> {
        // Fetch the note first to verify it exists and show details in the prompt
        let note = match self.store.get(id) {
            Some(note) => note.clone(),
            None => {
                return Err(NotesError::NoteNotFound { id });
            }
        };

        // Show note details and prompt for confirmation (unless force flag is set)
        if !force {
            println!("You are about to delete the following note:");
            println!("ID:       {}", note.id);
            if let Some(title) = &note.title {
                println!("Title:    {}", title);
            }
            println!("Category: {}", note.category);
            println!(
                "Created:  {}",
                format_timestamp(&note.created_at.with_timezone(&Local))
            );

            // Show content preview (first line or two)
            if !note.content.is_empty() {
                let preview = note.content.lines().take(2).collect::<Vec<_>>().join("\n");
                println!("\nContent preview:");
                println!(
                    "{}{}",
                    preview,
                    if note.content.lines().count() > 2 { "..." } else { "" }
                );
            }

            println!("\nThis action cannot be undone!");
            if !self
                .confirmation
                .confirm("Are you sure you want to delete your note?")?
            {
                println!("Deletion cancelled.");
                return Ok(());
            }
        }

        self.store.delete_note(id)?;
        println!("Note {} has been permanently deleted.", id);
        Ok(())
    }

    fn handle_categories(&self) {
        for entry in self.store.categories().iter() {
            let accent = hex_to_color256(&entry.accent).unwrap_or(Color::Cyan);
            let swatch = Style::new().bg(accent).apply_to("  ");
            println!(
                "{} {:<10} background {}  accent {}",
                swatch, entry.name, entry.background, entry.accent
            );
        }
    }

    /// Opens the configured editor on a temp file seeded with the given
    /// content and returns whatever the user saved.
    fn open_editor_with_content(&self, existing: &str) -> Result<String> {
        let temp_file = Builder::new().suffix(".txt").tempfile()?;
        let temp_path = temp_file.path().to_path_buf();

        fs::write(&temp_path, existing)?;

        let editor_cmd = self.config.get_editor_command();
        info!("Opening editor to write note content. Save and exit when done...");
        self.launch_editor(&editor_cmd, &temp_path)?;

        Ok(fs::read_to_string(&temp_path)?)
    }

    fn launch_editor(&self, editor_cmd: &str, file_path: &Path) -> Result<()> {
        let path_str = file_path.to_string_lossy();

        // Handle shell-like command parsing
        let args = split(editor_cmd).map_err(|e| NotesError::EditorError {
            message: format!("Failed to parse editor command: {}", e),
        })?;

        if args.is_empty() {
            return Err(NotesError::EditorError {
                message: "Empty editor command".to_string(),
            });
        }

        // First word is the program name, rest are arguments
        let program = &args[0];
        let mut command = Command::new(program);
        if args.len() > 1 {
            command.args(&args[1..]);
        }
        command.arg(path_str.as_ref());

        let status = command.status()?;
        if !status.success() {
            return Err(NotesError::EditorError {
                message: "Editor exited with non-zero status".to_string(),
            });
        }

        Ok(())
    }
}

/// Maps a `#rrggbb` color to the nearest entry of the 6x6x6 ANSI color cube.
fn hex_to_color256(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    let scale = |c: u8| (c as u16 * 5 + 127) / 255;
    let index = 16 + 36 * scale(r) + 6 * scale(g) + scale(b);
    Some(Color::Color256(index as u8))
}

#[cfg(test)]
mod tests {
    use console::Color;

    use crate::{CategorySet, Commands, Config, MemoryStorage, NoteStore, Result};

    use super::{hex_to_color256, App, Confirmation};

    struct CannedConfirmation(bool);

    impl Confirmation for CannedConfirmation {
        fn confirm(&self, _prompt: &str) -> Result<bool> {
            Ok(self.0)
        }
    }

    fn app_with_note(confirm: bool) -> (App, MemoryStorage, i64) {
        let backend = MemoryStorage::default();
        let mut store = NoteStore::new(Box::new(backend.clone()), CategorySet::default());
        store.hydrate();
        store.set_draft_content("remember this");
        let id = store.add_note().expect("add").expect("id");

        let app = App::new(
            store,
            Config::default(),
            false,
            Box::new(CannedConfirmation(confirm)),
        );
        (app, backend, id)
    }

    #[test]
    fn declined_confirmation_leaves_the_note_in_place() {
        let (mut app, backend, id) = app_with_note(false);
        app.run(Commands::Delete { id, force: false }).expect("run");
        assert_eq!(backend.snapshot().len(), 1);
    }

    #[test]
    fn confirmed_delete_removes_the_note() {
        let (mut app, backend, id) = app_with_note(true);
        app.run(Commands::Delete { id, force: false }).expect("run");
        assert!(backend.snapshot().is_empty());
    }

    #[test]
    fn force_delete_skips_the_prompt() {
        // A confirmation that would decline must not be consulted.
        let (mut app, backend, id) = app_with_note(false);
        app.run(Commands::Delete { id, force: true }).expect("run");
        assert!(backend.snapshot().is_empty());
    }

    #[test]
    fn hex_colors_map_into_the_ansi_cube() {
        assert_eq!(hex_to_color256("#000000"), Some(Color::Color256(16)));
        assert_eq!(hex_to_color256("#ffffff"), Some(Color::Color256(231)));
        assert!(hex_to_color256("#1976d2").is_some());
    }

    #[test]
    fn malformed_hex_colors_are_rejected() {
        assert_eq!(hex_to_color256("1976d2"), None);
        assert_eq!(hex_to_color256("#123"), None);
        assert_eq!(hex_to_color256("#zzzzzz"), None);
    }
}

//! Shared types for the quicknotes application.
//!
//! This module contains the crate-wide Result alias and the CLI command
//! surface.
use std::path::PathBuf;

use clap::Subcommand;

use crate::{NotesError, DEFAULT_CATEGORY};

/// A specialized Result type for quicknotes operations.
pub type Result<T> = std::result::Result<T, NotesError>;

/// Field of the edit buffer targeted by an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Title,
    Content,
    Category,
}

/// Available subcommands for the quicknotes application
#[derive(Subcommand)]
pub enum Commands {
    /// Add a new note
    Add {
        /// Content of the note; omit to compose it in your editor with --edit
        content: Option<String>,

        /// Title of the note (optional)
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// Category label for the note
        #[clap(short, long, default_value = DEFAULT_CATEGORY)]
        category: String,

        /// Path to a file containing the note's content
        #[clap(short, long)]
        file: Option<PathBuf>,

        /// Open content in editor before saving
        #[clap(short, long)]
        edit: bool,
    },

    /// List all notes as cards
    List {
        /// Format output as raw JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Edit an existing note
    Edit {
        /// ID of the note to edit
        id: i64,

        /// New title for the note
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// New content for the note
        #[clap(short, long)]
        content: Option<String>,

        /// New category label for the note
        #[clap(short = 'C', long)]
        category: Option<String>,

        /// Open content in editor before saving
        #[clap(short, long)]
        edit: bool,
    },

    /// Delete a note by ID
    Delete {
        /// ID of the note to delete
        id: i64,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Show the available categories and their colors
    Categories,
}

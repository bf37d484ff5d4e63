//! User preferences carried by the model.
//!
//! # Responsibility
//! - Hold GUI geometry and per-list storage paths as pass-through state.
//! - Provide serde shape with defaults for an external loader.
//!
//! # Invariants
//! - Storage paths are never empty.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_WINDOW_WIDTH: f64 = 740.0;
const DEFAULT_WINDOW_HEIGHT: f64 = 600.0;

/// Main window geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiSettings {
    pub window_width: f64,
    pub window_height: f64,
    /// `None` lets the window manager choose.
    pub window_x: Option<i32>,
    pub window_y: Option<i32>,
}

impl Default for GuiSettings {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            window_x: None,
            window_y: None,
        }
    }
}

/// Storage slot addressed by a file path preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFile {
    AddressBook,
    FoodList,
    RecordList,
    UserList,
    Calendar,
}

impl DataFile {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AddressBook => "address_book",
            Self::FoodList => "food_list",
            Self::RecordList => "record_list",
            Self::UserList => "user_list",
            Self::Calendar => "calendar",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPrefs {
    pub gui_settings: GuiSettings,
    address_book_file_path: PathBuf,
    food_list_file_path: PathBuf,
    record_list_file_path: PathBuf,
    user_list_file_path: PathBuf,
    calendar_file_path: PathBuf,
}

impl Default for UserPrefs {
    fn default() -> Self {
        Self {
            gui_settings: GuiSettings::default(),
            address_book_file_path: PathBuf::from("data/addressbook.json"),
            food_list_file_path: PathBuf::from("data/foodlist.json"),
            record_list_file_path: PathBuf::from("data/recordlist.json"),
            user_list_file_path: PathBuf::from("data/biography.json"),
            calendar_file_path: PathBuf::from("data/calendar.json"),
        }
    }
}

impl UserPrefs {
    pub fn file_path(&self, file: DataFile) -> &Path {
        match file {
            DataFile::AddressBook => &self.address_book_file_path,
            DataFile::FoodList => &self.food_list_file_path,
            DataFile::RecordList => &self.record_list_file_path,
            DataFile::UserList => &self.user_list_file_path,
            DataFile::Calendar => &self.calendar_file_path,
        }
    }

    pub fn set_file_path(
        &mut self,
        file: DataFile,
        path: impl Into<PathBuf>,
    ) -> Result<(), PrefsError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(PrefsError::EmptyPath(file));
        }
        let slot = match file {
            DataFile::AddressBook => &mut self.address_book_file_path,
            DataFile::FoodList => &mut self.food_list_file_path,
            DataFile::RecordList => &mut self.record_list_file_path,
            DataFile::UserList => &mut self.user_list_file_path,
            DataFile::Calendar => &mut self.calendar_file_path,
        };
        *slot = path;
        Ok(())
    }

    /// Checks loaded preferences; deserialization alone does not.
    pub fn validate(&self) -> Result<(), PrefsError> {
        for file in [
            DataFile::AddressBook,
            DataFile::FoodList,
            DataFile::RecordList,
            DataFile::UserList,
            DataFile::Calendar,
        ] {
            if self.file_path(file).as_os_str().is_empty() {
                return Err(PrefsError::EmptyPath(file));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefsError {
    EmptyPath(DataFile),
}

impl Display for PrefsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPath(file) => write!(f, "{} file path must not be empty", file.as_str()),
        }
    }
}

impl Error for PrefsError {}

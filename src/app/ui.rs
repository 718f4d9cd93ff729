//! UI panels, windows, and dialogs.

mod center;
mod dialogs;
mod icons;
mod info;
mod side;
mod top;

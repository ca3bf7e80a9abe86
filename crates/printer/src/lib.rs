// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! Renders Kotlin metadata as Kotlin-like declaration text.

mod annotations;
mod context;
mod declarations;
mod flags;
mod options;
mod output;
mod printer;
mod session;
mod types;
mod visited;

#[cfg(test)]
mod testing;

pub use crate::context::INVALID_CLASS_NAME;
pub use crate::options::PrinterOptions;
pub use crate::printer::KotlinMetadataPrinter;
pub use crate::visited::VisitedSet;

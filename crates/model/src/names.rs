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

//! Conversions between internal (`pkg/Outer$Inner`) and external (`pkg.Outer$Inner`) class
//! names.

pub const PACKAGE_SEPARATOR: char = '/';
pub const EXTERNAL_PACKAGE_SEPARATOR: char = '.';
pub const INNER_CLASS_SEPARATOR: char = '$';

/// `pkg/sub/Name` -> `pkg/sub`; empty for the default package.
pub fn internal_package_name(internal: &str) -> &str {
    internal
        .rfind(PACKAGE_SEPARATOR)
        .map_or("", |idx| &internal[..idx])
}

/// `pkg/sub/Outer$Inner` -> `Outer$Inner`.
pub fn internal_short_class_name(internal: &str) -> &str {
    internal
        .rfind(PACKAGE_SEPARATOR)
        .map_or(internal, |idx| &internal[idx + 1..])
}

pub fn external_class_name(internal: &str) -> String {
    internal.replace(PACKAGE_SEPARATOR, ".")
}

pub fn external_package_name(internal: &str) -> String {
    external_class_name(internal_package_name(internal))
}

/// `pkg.sub.Name` -> `Name`.
pub fn external_short_class_name(external: &str) -> &str {
    external
        .rfind(EXTERNAL_PACKAGE_SEPARATOR)
        .map_or(external, |idx| &external[idx + 1..])
}

/// Accepts either `pkg.Name` or `pkg/Name`.
pub fn internal_class_name(name: &str) -> String {
    name.replace(EXTERNAL_PACKAGE_SEPARATOR, "/")
}

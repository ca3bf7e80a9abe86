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

/// One level of indentation.
pub const INDENT_UNIT: &str = "    ";

/// A stack of text buffers sharing one indentation depth. All writes go to the buffer on
/// top; popping hands back its text so the caller can decide where (or whether) it goes.
#[derive(Debug, Default)]
pub struct OutputStack {
    buffers: Vec<String>,
    depth: usize,
}

impl OutputStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self) {
        self.buffers.push(String::new());
    }

    /// Remove the active buffer and return its text.
    ///
    /// Panics if there is no buffer: every pop must pair with an earlier push.
    pub fn pop(&mut self) -> String {
        match self.buffers.pop() {
            Some(text) => text,
            None => panic!("output buffer stack underflow"),
        }
    }

    /// Throw away everything written to the active buffer.
    pub fn reset(&mut self) {
        self.pop();
        self.push();
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    fn active(&mut self) -> &mut String {
        match self.buffers.last_mut() {
            Some(buffer) => buffer,
            None => panic!("write with no active output buffer"),
        }
    }

    pub fn write(&mut self, text: &str) {
        self.active().push_str(text);
    }

    pub fn write_indented(&mut self, text: &str) {
        let indent = INDENT_UNIT.repeat(self.depth);
        let buffer = self.active();
        buffer.push_str(&indent);
        buffer.push_str(text);
    }

    pub fn newline(&mut self) {
        self.write("\n");
    }

    pub fn writeln(&mut self, text: &str) {
        self.write(text);
        self.newline();
    }

    pub fn writeln_indented(&mut self, text: &str) {
        self.write_indented(text);
        self.newline();
    }

    /// Last character of the active buffer, `None` if nothing has been written to it.
    pub fn previous_char(&self) -> Option<char> {
        self.buffers.last().and_then(|b| b.chars().last())
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn outdent(&mut self) {
        assert!(self.depth > 0, "outdent below zero indentation");
        self.depth -= 1;
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

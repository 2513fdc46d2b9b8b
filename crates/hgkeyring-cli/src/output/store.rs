// SPDX-License-Identifier: Apache-2.0

use console::style;
use std::io::{self, Write};

use crate::cli::OutputContext;
use crate::commands::types::{StoreAction, StoreUpdateResult, StoredPasswordResult};

use super::Renderable;

impl Renderable for StoredPasswordResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        match self.password {
            Some(ref password) => writeln!(w, "{password}"),
            None => writeln!(
                w,
                "{} No password stored for {} at {}",
                style("!").yellow().bold(),
                style(&self.user).cyan(),
                self.url
            ),
        }
    }
}

impl Renderable for StoreUpdateResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        let verb = match self.action {
            StoreAction::Saved => "Saved",
            StoreAction::Cleared => "Cleared",
        };
        writeln!(
            w,
            "{} {verb} password for {} at {}",
            style("*").green().bold(),
            style(&self.user).cyan(),
            self.url
        )
    }
}

// SPDX-License-Identifier: Apache-2.0

use std::io::{self, Write};

use crate::cli::OutputContext;
use crate::commands::types::ResolveResult;

use super::Renderable;

impl Renderable for ResolveResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        if let Some(ref authorization) = self.authorization {
            writeln!(w, "{authorization}")?;
            return Ok(());
        }
        writeln!(w, "username={}", self.username)?;
        if let Some(ref password) = self.password {
            writeln!(w, "password={password}")?;
        }
        Ok(())
    }
}

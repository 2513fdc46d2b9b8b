// SPDX-License-Identifier: Apache-2.0

use console::style;
use std::io::{self, Write};

use crate::cli::OutputContext;
use crate::commands::types::{AuthShowResult, GroupMatch};

use super::Renderable;

fn write_scope(w: &mut dyn Write, name: &str, group: Option<&GroupMatch>) -> io::Result<()> {
    let Some(group) = group else {
        return writeln!(w, "  {name}: {}", style("no matching group").dim());
    };
    writeln!(w, "  {name}: [auth.{}]", style(&group.group).cyan())?;
    if let Some(ref prefix) = group.prefix {
        writeln!(w, "    prefix: {prefix}")?;
    }
    if let Some(ref username) = group.username {
        writeln!(w, "    username: {username}")?;
    }
    if group.has_password {
        writeln!(w, "    password: ********")?;
    }
    Ok(())
}

impl Renderable for AuthShowResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "{}", style(&self.url).bold())?;
        match self.repository {
            Some(ref root) => writeln!(w, "  repository: {root}")?,
            None => writeln!(w, "  repository: {}", style("none").dim())?,
        }
        write_scope(w, "session", self.session.as_ref())?;
        write_scope(w, "local", self.local.as_ref())
    }
}

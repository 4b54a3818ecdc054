use crate::output::{print_json, print_lines};
use clap::Args;
use openspec_core::listing::{ListMode, Listing};
use std::path::Path;

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// List specs instead of changes
    #[arg(long, conflicts_with_all = ["archive", "mode"])]
    pub specs: bool,

    /// List archived changes instead of active ones
    #[arg(long, conflicts_with = "mode")]
    pub archive: bool,

    /// View to list: changes, specs, or archive
    #[arg(long)]
    pub mode: Option<ListMode>,
}

impl ListArgs {
    pub fn mode(&self) -> ListMode {
        if self.specs {
            ListMode::Specs
        } else if self.archive {
            ListMode::Archive
        } else {
            self.mode.unwrap_or_default()
        }
    }
}

pub fn run(root: &Path, args: ListArgs, json: bool) -> anyhow::Result<()> {
    let mode = args.mode();
    tracing::debug!(root = %root.display(), %mode, "listing");

    // No added context: the missing-workspace message is shown verbatim.
    let listing = Listing::collect(root, mode)?;

    if json {
        return print_json(&listing);
    }
    print_lines(&listing.lines())
}

//! things tags command implementation.

use crate::client::Things;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};

#[derive(serde::Serialize)]
struct TagListOutput {
    tags: Vec<String>,
    total: usize,
}

pub fn run(things: &Things, output: OutputOptions) -> Result<()> {
    let tags = things.tags()?;

    let mut human = HumanOutput::new(format!("tags: {}", tags.len()));
    for tag in &tags {
        human.push_detail(tag.clone());
    }

    let report = TagListOutput {
        total: tags.len(),
        tags,
    };
    emit_success(output, "tags", &report, Some(&human))
}

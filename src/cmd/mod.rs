pub mod division;
pub mod heirs;
pub mod schema;
pub mod tax;
pub mod validate;

use clap::Args;
use serde::de::DeserializeOwned;
use souzoku::core::FamilyStructure;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Read a JSON document from a file (or stdin with "-")
pub fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    if path.as_os_str() == "-" {
        read_from_stdin()
    } else {
        read_from_file(path)
    }
}

fn read_from_file<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let value = serde_json::from_reader(reader)?;
    Ok(value)
}

fn read_from_stdin<T: DeserializeOwned>() -> anyhow::Result<T> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    let value = serde_json::from_slice(&buffer)?;
    Ok(value)
}

/// Family composition, from flags or a JSON file
#[derive(Args, Debug)]
pub struct FamilyArgs {
    /// JSON file containing a family structure ("-" for stdin)
    #[arg(
        short,
        long,
        conflicts_with_all = [
            "spouse",
            "children",
            "adopted",
            "grandchild_adopted",
            "parents",
            "siblings",
            "half_siblings",
            "non_heirs",
        ]
    )]
    file: Option<PathBuf>,

    /// A surviving spouse exists
    #[arg(long)]
    spouse: bool,

    /// Number of children, including adopted children
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    children: i32,

    /// How many of the children are adopted
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    adopted: i32,

    /// How many of the adopted children are grandchildren
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    grandchild_adopted: i32,

    /// Number of surviving parents
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    parents: i32,

    /// Number of full siblings
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    siblings: i32,

    /// Number of half siblings
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    half_siblings: i32,

    /// Number of legatees outside the statutory order
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    non_heirs: i32,
}

impl FamilyArgs {
    pub fn load(&self) -> anyhow::Result<FamilyStructure> {
        if let Some(path) = &self.file {
            return read_json(path);
        }
        Ok(FamilyStructure {
            spouse_exists: self.spouse,
            children_count: self.children,
            adopted_children_count: self.adopted,
            grandchild_adopted_count: self.grandchild_adopted,
            parents_alive: self.parents,
            siblings_count: self.siblings,
            half_siblings_count: self.half_siblings,
            non_heirs_count: self.non_heirs,
        })
    }
}

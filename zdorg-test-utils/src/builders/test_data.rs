//! Test data builders for creating test scenarios

use std::path::{Path, PathBuf};
use zdorg_core::form::{DataSource, UpdateForm};
use zdorg_core::payload::{FieldUpdate, UpdatePayload, build};

/// Builder for field rows and target IDs
#[derive(Debug, Default)]
pub struct TestDataBuilder {
    fields: Vec<FieldUpdate>,
    organization_ids: Vec<String>,
}

impl TestDataBuilder {
    /// Create a new test data builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field row
    pub fn with_field(mut self, field: &str, value: &str) -> Self {
        self.fields.push(FieldUpdate::new(field, value));
        self
    }

    /// Add target organizations
    pub fn with_organizations(mut self, ids: &[&str]) -> Self {
        self.organization_ids
            .extend(ids.iter().map(|id| id.to_string()));
        self
    }

    pub fn fields(&self) -> &[FieldUpdate] {
        &self.fields
    }

    pub fn organization_ids(&self) -> Vec<String> {
        self.organization_ids.clone()
    }

    /// Build the update payload for the field rows
    pub fn payload(&self) -> UpdatePayload {
        build(&self.fields)
    }

    /// Build a ready-to-submit form targeting the organizations as a CSV source
    pub fn form(&self) -> UpdateForm {
        UpdateForm {
            subdomain: "testsubdomain".to_string(),
            api_token: "testtoken".to_string(),
            fields: self.fields.clone(),
            source: DataSource::Csv(self.organization_ids.clone()),
            ..Default::default()
        }
    }

    /// CSV text with an `organization_id` column for the organizations
    pub fn csv_text(&self) -> String {
        let mut text = String::from("organization_id,name\n");
        for (index, id) in self.organization_ids.iter().enumerate() {
            text.push_str(&format!("{id},Organization {}\n", index + 1));
        }
        text
    }
}

/// Writes CSV fixtures into a directory and removes them on drop
pub struct TestCsvBuilder {
    base_dir: PathBuf,
    generated_files: Vec<PathBuf>,
}

impl TestCsvBuilder {
    /// Create a new CSV builder writing into `base_dir`
    pub fn new(base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            generated_files: Vec::new(),
        }
    }

    /// Write raw CSV text
    pub fn write(&mut self, name: &str, contents: &str) -> std::io::Result<PathBuf> {
        let file_path = self.base_dir.join(name);
        std::fs::write(&file_path, contents)?;
        self.generated_files.push(file_path.clone());
        Ok(file_path)
    }

    /// Write a CSV with `header` as the ID column and one row per ID
    pub fn write_ids(&mut self, name: &str, header: &str, ids: &[&str]) -> std::io::Result<PathBuf> {
        let mut contents = format!("{header}\n");
        for id in ids {
            contents.push_str(id);
            contents.push('\n');
        }
        self.write(name, &contents)
    }

    /// Write a sparse file of `size` bytes
    pub fn write_sized(&mut self, name: &str, size: u64) -> std::io::Result<PathBuf> {
        let file_path = self.base_dir.join(name);
        let file = std::fs::File::create(&file_path)?;
        file.set_len(size)?;
        self.generated_files.push(file_path.clone());
        Ok(file_path)
    }

    /// Clean up all generated files
    pub fn cleanup(&mut self) {
        for file_path in &self.generated_files {
            let _ = std::fs::remove_file(file_path);
        }
        self.generated_files.clear();
    }
}

impl Drop for TestCsvBuilder {
    fn drop(&mut self) {
        self.cleanup();
    }
}

use crate::Result;
use crate::api::client::{ApiClient, ResourceClient};
use crate::api::resources::{Resource, ResourceKind};
use crate::cli::main_types::{Commands, ConfigCommands, ResourceCommands};
use crate::error::{CustomError, StorageError};
use crate::storage::config::{Config, PROFILE_KEYS};
use crate::utils::retry::{RetryConfig, RetryExecutor};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Serialize;
use serde_json::{Value, json};
use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};

pub struct Dispatcher {
    config: Config,
    config_path: Option<PathBuf>,
    profile_name: String,
    api_key: Option<String>,
    retry: Option<RetryConfig>,
    verbose: bool,
}

impl Dispatcher {
    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        profile_name: String,
        api_key: Option<String>,
        verbose: bool,
        retry: bool,
    ) -> Self {
        Self {
            config,
            config_path,
            profile_name,
            api_key,
            retry: retry.then(RetryConfig::default),
            verbose,
        }
    }

    fn log_verbose(&self, msg: &str) {
        if self.verbose {
            log::debug!("{}", msg);
        }
    }

    fn client(&self) -> Result<ApiClient> {
        let profile = self.config.active_profile(Some(&self.profile_name));
        ApiClient::new(profile.to_api_config(self.api_key.clone()))
    }

    pub async fn dispatch(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Health => self.handle_health().await,
            Commands::Config { command } => self.handle_config_command(command),
            Commands::Tag { command } => self.run_resource(self.client()?.tags(), command).await,
            Commands::Equation { command } => {
                self.run_resource(self.client()?.equations(), command).await
            }
            Commands::Image { command } => {
                self.run_resource(self.client()?.images(), command).await
            }
            Commands::Concept { command } => {
                self.run_resource(self.client()?.concepts(), command).await
            }
            Commands::Problem { command } => {
                self.run_resource(self.client()?.problems(), command).await
            }
            Commands::Variant { command } => {
                self.run_resource(self.client()?.variants(), command).await
            }
        }
    }

    /// Run a read operation, retrying when `--retry` was given.
    async fn read<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        match &self.retry {
            Some(config) => RetryExecutor::new(config.clone()).execute(operation).await,
            None => operation().await,
        }
    }

    async fn handle_health(&self) -> Result<()> {
        let client = self.client()?;
        self.log_verbose(&format!("Checking health of {}", client.base_url()));

        let api = &client;
        self.read(move || api.health_check()).await?;
        println!("✅ API is healthy at {}", client.base_url());
        Ok(())
    }

    fn handle_config_command(&self, command: ConfigCommands) -> Result<()> {
        match command {
            ConfigCommands::Show => {
                self.log_verbose("Attempting config show command");

                println!("Current Configuration:");
                println!("=====================");
                match &self.config.default_profile {
                    Some(name) => println!("Default Profile: {}", name),
                    None => println!("Default Profile: (not set)"),
                }
                println!("Active Profile: {}", self.profile_name);

                println!("\nProfiles:");
                if self.config.profiles.is_empty() {
                    println!("  No profiles configured");
                } else {
                    let mut names: Vec<&String> = self.config.profiles.keys().collect();
                    names.sort();
                    for name in names {
                        let profile = &self.config.profiles[name];
                        let api = profile.to_api_config(None);
                        println!("  [{}]", name);
                        println!("    Base URL: {}", api.base_url());
                        println!("    Timeout: {} seconds", api.timeout_seconds);
                    }
                }
                Ok(())
            }
            ConfigCommands::Set { key, value } => {
                self.log_verbose(&format!(
                    "Attempting config set - key: {}, value: {}",
                    key, value
                ));

                let mut config = self.config.clone();
                config
                    .set_value(&self.profile_name, &key, &value)
                    .map_err(|e| match e {
                        StorageError::UnknownKey { .. } => CustomError::from(e).with_extra(
                            "validKeys",
                            json!(PROFILE_KEYS),
                        ),
                        other => CustomError::from(other),
                    })?;
                if config.default_profile.is_none() {
                    config.default_profile = Some(self.profile_name.clone());
                }
                config.save(self.config_path.clone())?;

                println!("✅ Set profile '{}' {} to: {}", self.profile_name, key, value);
                Ok(())
            }
        }
    }

    async fn run_resource<R: Resource>(
        &self,
        client: ResourceClient<R>,
        command: ResourceCommands,
    ) -> Result<()> {
        let client = &client;
        match command {
            ResourceCommands::Search { search } => {
                self.log_verbose(&format!("Searching {}s for '{}'", R::KIND, search));
                let query = json!({ "search": search });
                let query = &query;
                let found = self.read(move || client.search(query)).await?;
                if found.is_empty() {
                    println!("No {}s found matching the criteria.", R::KIND.segment());
                    return Ok(());
                }
                print_json(&found)
            }
            ResourceCommands::Get { id } => {
                let id = id.as_str();
                let record = self.read(move || client.get_by_id(id)).await?;
                print_json(&record)
            }
            ResourceCommands::Create { data, file } => {
                let mut input = parse_data(&data)?;
                if let Some(path) = file {
                    if R::KIND != ResourceKind::Image {
                        return Err(CustomError::generic(format!(
                            "--file is only supported when creating images, not {}s",
                            R::KIND.segment()
                        )));
                    }
                    attach_image_file(&mut input, Path::new(&path))?;
                }
                let created = client.create(&input).await?;
                print_json(&created)
            }
            ResourceCommands::Update { data } => {
                let input = parse_data(&data)?;
                let updated = client.update(&input).await?;
                print_json(&updated)
            }
            ResourceCommands::Delete { id } => {
                let deleted = client.delete_by_id(&id).await?;
                print_json(&deleted)
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| CustomError::generic(format!("Error serializing to JSON: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| {
        StorageError::FileIo {
            path: path.to_string_lossy().to_string(),
            source,
        }
        .into()
    })
}

/// Parse a `--data` argument: inline JSON or `@path` to a JSON file.
pub fn parse_data(raw: &str) -> Result<Value> {
    let text = match raw.strip_prefix('@') {
        Some(path) => {
            let bytes = read_file(Path::new(path))?;
            String::from_utf8_lossy(&bytes).into_owned()
        }
        None => raw.to_string(),
    };

    serde_json::from_str(&text)
        .map_err(|e| CustomError::generic(format!("--data is not valid JSON: {}", e)))
}

/// Content type guessed from the file extension.
fn image_content_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Embed a local file as the `image` field of an image create input.
///
/// `imageType` defaults to the file's content type when the input omits it.
pub fn attach_image_file(input: &mut Value, path: &Path) -> Result<()> {
    let bytes = read_file(path)?;
    let content_type = image_content_type(path);
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    let Some(object) = input.as_object_mut() else {
        return Err(CustomError::generic(
            "--data must be a JSON object when --file is given",
        ));
    };
    object.insert(
        "image".to_string(),
        json!({
            "fileName": file_name,
            "contentType": content_type,
            "data": STANDARD.encode(bytes),
        }),
    );
    object
        .entry("imageType")
        .or_insert_with(|| Value::String(content_type.to_string()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::tempdir;

    #[test]
    fn test_parse_inline_data() {
        let value = parse_data(r#"{"title":"Algebra"}"#).expect("valid JSON");
        assert_eq!(value, json!({ "title": "Algebra" }));

        let err = parse_data("{title").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Generic);
        assert!(err.message().starts_with("--data is not valid JSON"));
    }

    #[test]
    fn test_parse_data_from_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("tag.json");
        fs::write(&path, r#"{"title":"Geometry"}"#).expect("write");

        let value = parse_data(&format!("@{}", path.display())).expect("file input");
        assert_eq!(value["title"], "Geometry");

        let missing = parse_data(&format!("@{}", dir.path().join("nope.json").display()));
        assert!(missing.unwrap_err().message().contains("nope.json"));
    }

    #[test]
    fn test_attach_image_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("Logo.PNG");
        fs::write(&path, [0x89, b'P', b'N', b'G']).expect("write");

        let mut input = json!({ "title": "Logo" });
        attach_image_file(&mut input, &path).expect("attached");

        assert_eq!(input["imageType"], "image/png");
        assert_eq!(input["image"]["fileName"], "Logo.PNG");
        assert_eq!(input["image"]["contentType"], "image/png");
        assert_eq!(input["image"]["data"], STANDARD.encode([0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn test_attach_keeps_explicit_image_type() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("diagram.svg");
        fs::write(&path, "<svg/>").expect("write");

        let mut input = json!({ "title": "Diagram", "imageType": "image/png" });
        attach_image_file(&mut input, &path).expect("attached");
        assert_eq!(input["imageType"], "image/png");
        assert_eq!(input["image"]["contentType"], "image/svg+xml");

        let mut not_object = json!([1, 2]);
        assert!(attach_image_file(&mut not_object, &path).is_err());
    }

    #[test]
    fn test_unknown_extension_is_left_for_schema() {
        assert_eq!(
            image_content_type(Path::new("notes.txt")),
            "application/octet-stream"
        );
        assert_eq!(image_content_type(Path::new("photo.JPEG")), "image/jpeg");
    }
}

use crate::config::{NmRequest, RangeConfig, RequestedLink};
use crate::registry::NodeRegistry;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::Path;

/// Read a JSON or YAML document, chosen by file extension
fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)
        .wrap_err_with(|| format!("Failed to open '{}'", path.display()))?;

    let is_yaml = path
        .extension()
        .map_or(false, |ext| ext == "yaml" || ext == "yml");

    let document = if is_yaml {
        serde_yaml::from_reader(file)
            .wrap_err_with(|| format!("Failed to parse YAML in '{}'", path.display()))?
    } else {
        serde_json::from_reader(file)
            .wrap_err_with(|| format!("Failed to parse JSON in '{}'", path.display()))?
    };

    Ok(document)
}

/// Load a range config from file
pub fn load_range_config(path: &Path) -> Result<RangeConfig> {
    info!("Loading range config from: {:?}", path);
    let range_config: RangeConfig = read_document(path)?;
    info!(
        "Loaded range '{}' with {} nodes",
        range_config.range.name.as_deref().unwrap_or("unnamed"),
        range_config.range.race_nodes.len()
    );
    Ok(range_config)
}

/// Load an NM request from file
pub fn load_nm_request(path: &Path) -> Result<NmRequest> {
    info!("Loading NM request from: {:?}", path);
    let request: NmRequest = read_document(path)?;
    info!("Loaded {} requested links", request.links.len());
    Ok(request)
}

/// Build a request for every client/server and server/server pair.
///
/// Each ordered pair gets its own single-recipient request offering only
/// `channel_id`. Client-to-client pairs are never requested.
pub fn generate_nm_request(registry: &NodeRegistry, channel_id: &str) -> NmRequest {
    let mut links = Vec::new();

    for sender in registry.nodes() {
        for recipient in registry.nodes() {
            if sender.id == recipient.id || (sender.class.is_client() && recipient.class.is_client()) {
                continue;
            }
            links.push(RequestedLink::new(&sender.id, &recipient.id, &[channel_id]));
        }
    }

    info!("Generated default NM request with {} links", links.len());
    NmRequest { links }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn temp_with_suffix(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_json_range_config() {
        let json = r#"{"range": {"name": "1x2", "RACE_nodes": [
            {"name": "race-client-00001", "type": "RACE linux client"},
            {"name": "race-server-00001", "type": "RACE linux server"},
            {"name": "race-server-00002", "type": "RACE linux server"}
        ]}}"#;
        let file = temp_with_suffix(".json", json);

        let config = load_range_config(file.path()).unwrap();
        assert_eq!(config.range.race_nodes.len(), 3);
    }

    #[test]
    fn test_load_yaml_nm_request() {
        let yaml = r#"
links:
  - sender: race-client-00001
    recipients: [race-server-00001]
    channels: [skyhookBasicComposition]
"#;
        let file = temp_with_suffix(".yaml", yaml);

        let request = load_nm_request(file.path()).unwrap();
        assert_eq!(request.links.len(), 1);
        assert_eq!(request.links[0].recipients, vec!["race-server-00001".to_string()]);
    }

    #[test]
    fn test_invalid_document_reports_path() {
        let file = temp_with_suffix(".json", "{not json");
        let err = load_nm_request(file.path()).unwrap_err();
        assert!(format!("{:?}", err).contains("Failed to parse JSON"));
    }

    #[test]
    fn test_missing_file() {
        assert!(load_range_config(Path::new("/nonexistent/range.json")).is_err());
    }

    #[test]
    fn test_generate_nm_request() {
        let range = RangeConfig::from_node_names(["client-1", "client-2", "server-1", "server-2"]);
        let registry = NodeRegistry::from_range_config(&range).unwrap();

        let request = generate_nm_request(&registry, "chan");
        // 2 clients x 2 servers x 2 directions + 2 server-server directions
        assert_eq!(request.links.len(), 10);
        assert!(request
            .links
            .iter()
            .all(|l| l.recipients.len() == 1 && l.channels == vec!["chan".to_string()]));
        assert!(!request
            .links
            .iter()
            .any(|l| l.sender.contains("client") && l.recipients[0].contains("client")));
        assert_eq!(request.links[0].sender, "client-1");
        assert_eq!(request.links[0].recipients[0], "server-1");
    }
}

use crate::build_info::domain::{Agent, BuildCoordinates, BuildInfo, GeneralDetails};
use crate::build_info::services::{MergedBuild, PropertyFilter};
use crate::shared::error::BuildInfoError;
use crate::shared::Result;
use chrono::{DateTime, FixedOffset, Utc};

/// Format of the `started` field: millisecond precision, numeric zone offset
pub const STARTED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Identity fields stamped on the document at assembly time
///
/// These are never written to fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildIdentity {
    pub agent: Option<Agent>,
    pub principal: String,
    pub url: String,
}

impl BuildIdentity {
    /// Identity naming this tool as the build agent
    pub fn default_agent() -> Self {
        Self {
            agent: Some(Agent {
                name: "build-info-collector".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            }),
            ..Default::default()
        }
    }
}

/// BuildInfoAssembler service producing the final build-info document
pub struct BuildInfoAssembler;

impl BuildInfoAssembler {
    /// Wraps merged fragments with the top-level build metadata
    ///
    /// # Arguments
    /// * `coordinates` - Build name, number and project
    /// * `general` - Start marker written when the build was started
    /// * `merged` - Output of the fragment merger
    /// * `identity` - Transient agent, principal and url
    /// * `filter` - Include/exclude filter applied to the environment
    /// * `now` - Used to compute the build duration
    ///
    /// # Errors
    /// Returns [`BuildInfoError::BuildNotStarted`] when no start marker exists.
    pub fn assemble(
        coordinates: &BuildCoordinates,
        general: Option<&GeneralDetails>,
        merged: MergedBuild,
        identity: &BuildIdentity,
        filter: &PropertyFilter,
        now: DateTime<Utc>,
    ) -> Result<BuildInfo> {
        let general = Self::require_started(coordinates, general)?;

        let duration_millis = (now - general.timestamp.with_timezone(&Utc))
            .num_milliseconds()
            .max(0);

        Ok(BuildInfo {
            name: coordinates.name.clone(),
            number: coordinates.number.clone(),
            agent: identity.agent.clone(),
            started: Self::format_started(&general.timestamp),
            duration_millis,
            principal: identity.principal.clone(),
            url: identity.url.clone(),
            modules: merged.modules,
            properties: filter.filter(merged.env),
            vcs_list: merged.vcs_list,
            issues: merged.issues,
        })
    }

    /// Fails with [`BuildInfoError::BuildNotStarted`] unless a start marker exists
    pub fn require_started<'a>(
        coordinates: &BuildCoordinates,
        general: Option<&'a GeneralDetails>,
    ) -> Result<&'a GeneralDetails> {
        general.ok_or_else(|| {
            BuildInfoError::BuildNotStarted {
                name: coordinates.name.clone(),
                number: coordinates.number.clone(),
                project: coordinates.project.clone().unwrap_or_default(),
            }
            .into()
        })
    }

    pub fn format_started(timestamp: &DateTime<FixedOffset>) -> String {
        timestamp.format(STARTED_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_info::domain::{Module, ModuleType};
    use std::collections::BTreeMap;

    fn started() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-03-01T10:15:30.250+02:00").unwrap()
    }

    fn coordinates() -> BuildCoordinates {
        BuildCoordinates::new("b1", "1", Some("proj".to_string()))
    }

    #[test]
    fn test_format_started() {
        assert_eq!(
            BuildInfoAssembler::format_started(&started()),
            "2024-03-01T10:15:30.250+0200"
        );
    }

    #[test]
    fn test_assemble_without_start_marker_fails() {
        let result = BuildInfoAssembler::assemble(
            &coordinates(),
            None,
            MergedBuild::default(),
            &BuildIdentity::default(),
            &PropertyFilter::new(&[], &[]).unwrap(),
            Utc::now(),
        );

        let message = result.unwrap_err().to_string();
        assert!(message.contains("b1"));
        assert!(message.contains("proj"));
        assert!(message.contains("start"));
    }

    #[test]
    fn test_assemble_stamps_identity_and_filters_properties() {
        let mut env = BTreeMap::new();
        env.insert("buildInfo.env.FOO".to_string(), "1".to_string());
        env.insert("buildInfo.env.SECRET_TOKEN".to_string(), "x".to_string());
        let merged = MergedBuild {
            modules: vec![Module::new("mod:1.0", ModuleType::Cargo)],
            env,
            ..Default::default()
        };
        let identity = BuildIdentity {
            principal: "ci-bot".to_string(),
            url: "https://ci.example/job/1".to_string(),
            ..BuildIdentity::default_agent()
        };
        let now = started().with_timezone(&Utc) + chrono::Duration::milliseconds(1500);

        let build_info = BuildInfoAssembler::assemble(
            &coordinates(),
            Some(&GeneralDetails::new(started())),
            merged,
            &identity,
            &PropertyFilter::with_default_excludes().unwrap(),
            now,
        )
        .unwrap();

        assert_eq!(build_info.name, "b1");
        assert_eq!(build_info.number, "1");
        assert_eq!(build_info.started, "2024-03-01T10:15:30.250+0200");
        assert_eq!(build_info.duration_millis, 1500);
        assert_eq!(build_info.principal, "ci-bot");
        assert_eq!(
            build_info.agent.as_ref().map(|a| a.name.as_str()),
            Some("build-info-collector")
        );
        assert_eq!(build_info.modules.len(), 1);
        assert_eq!(
            build_info.properties.keys().collect::<Vec<_>>(),
            vec!["buildInfo.env.FOO"]
        );
    }
}

//! ---
//! wusim_section: "04-fixture"
//! wusim_subsection: "module"
//! wusim_type: "source"
//! wusim_scope: "code"
//! wusim_description: "Execution-context descriptor (init_data.xml)."
//! wusim_version: "v0.1.0"
//! wusim_owner: "tbd"
//! ---
use std::path::Path;

use indexmap::IndexMap;

use crate::catalog::FixtureCatalog;

/// Descriptor file name in the slot directory.
pub const INIT_DATA_FILE: &str = "init_data.xml";

const ROOT_TAG: &str = "app_init_data";
const LEGACY_CLOSE_TAG: &str = "global_preferences";

/// Ordered tagged fields of the execution-context descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitData {
    fields: IndexMap<&'static str, String>,
    legacy_close: bool,
}

impl InitData {
    /// Descriptor for a fixture rooted at `root` (an absolute path).
    pub fn new(root: &Path, catalog: &FixtureCatalog) -> Self {
        let root = root.display().to_string();
        let mut fields = IndexMap::new();
        let zero = "0.000000";
        for (tag, value) in [
            ("major_version", "0".to_owned()),
            ("minor_version", "0".to_owned()),
            ("release", "0".to_owned()),
            ("app_version", "000".to_owned()),
            ("hostid", "0".to_owned()),
            ("app_name", catalog.app_name.clone()),
            ("project_preferences", String::new()),
            ("project_dir", format!("{root}/projects")),
            ("boinc_dir", root.clone()),
            ("wu_name", catalog.workunit_name.clone()),
            ("shm_key", "0".to_owned()),
            ("slot", "0".to_owned()),
            ("wu_cpu_time", zero.to_owned()),
            ("starting_elapsed_time", zero.to_owned()),
            ("user_total_credit", zero.to_owned()),
            ("user_expavg_credit", zero.to_owned()),
            ("host_total_credit", zero.to_owned()),
            ("host_expavg_credit", zero.to_owned()),
            ("resource_share_fraction", zero.to_owned()),
            ("checkpoint_period", "60.000000".to_owned()),
            ("fraction_done_start", zero.to_owned()),
            ("fraction_done_end", "1.000000".to_owned()),
            ("rsc_fpops_est", zero.to_owned()),
            ("rsc_fpops_bound", zero.to_owned()),
            ("rsc_memory_bound", zero.to_owned()),
            ("rsc_disk_bound", zero.to_owned()),
            ("computation_deadline", zero.to_owned()),
            ("host_info", String::new()),
            ("proxy_info", String::new()),
        ] {
            fields.insert(tag, value);
        }
        Self {
            fields,
            legacy_close: catalog.legacy_descriptor,
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!("   <{ROOT_TAG}>\n");
        for (tag, value) in &self.fields {
            out.push_str(&format!("     <{tag}>{value}</{tag}>\n"));
        }
        if self.legacy_close {
            out.push_str(&format!("     </{LEGACY_CLOSE_TAG}>\n"));
        }
        out.push_str(&format!("   </{ROOT_TAG}>\n"));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_derive_from_root() {
        let text = InitData::new(Path::new("/work/test"), &FixtureCatalog::default()).render();
        assert!(text.contains("     <project_dir>/work/test/projects</project_dir>\n"));
        assert!(text.contains("     <boinc_dir>/work/test</boinc_dir>\n"));
        assert!(text.contains("     <wu_name>oifs_43r3_NNNN_yyyymmddhh_1_d000_0</wu_name>\n"));
        assert_eq!(text.lines().count(), 29 + 2);
    }

    #[test]
    fn render_nests_fields_in_root_tag() {
        let text = InitData::new(Path::new("/work/test"), &FixtureCatalog::default()).render();
        assert!(text.starts_with("   <app_init_data>\n     <major_version>0</major_version>\n"));
        assert!(text.contains("     <app_name>openifs</app_name>\n"));
        assert!(text.ends_with("     <proxy_info></proxy_info>\n   </app_init_data>\n"));
        assert!(!text.contains("global_preferences"));
    }

    #[test]
    fn legacy_descriptor_closes_preferences_before_root() {
        let catalog = FixtureCatalog {
            legacy_descriptor: true,
            ..FixtureCatalog::default()
        };
        let text = InitData::new(Path::new("/work/test"), &catalog).render();
        assert!(text.ends_with(
            "     <proxy_info></proxy_info>\n     </global_preferences>\n   </app_init_data>\n"
        ));
    }
}

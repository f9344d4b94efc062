//! ---
//! wusim_section: "04-fixture"
//! wusim_subsection: "module"
//! wusim_type: "source"
//! wusim_scope: "code"
//! wusim_description: "Fixed catalog of names and run-configuration values."
//! wusim_version: "v0.1.0"
//! wusim_owner: "tbd"
//! ---
use indexmap::IndexMap;

/// Names and values the fixture tree is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureCatalog {
    pub app_name: String,
    /// Model binary staged in the application directory.
    pub app_file: String,
    pub workunit_name: String,
    pub namelist: RunConfiguration,
    /// Ancillary datasets; each yields `<name>_0.zip` and `jf_<name>`.
    pub ancillaries: Vec<String>,
    /// Close a never-opened `global_preferences` tag in `init_data.xml`.
    pub legacy_descriptor: bool,
}

impl Default for FixtureCatalog {
    fn default() -> Self {
        Self {
            app_name: "openifs".to_owned(),
            app_file: "oifs_43r3_app_1.00_x86_64-pc-linux-gnu".to_owned(),
            workunit_name: "oifs_43r3_NNNN_yyyymmddhh_1_d000_0".to_owned(),
            namelist: RunConfiguration::default(),
            ancillaries: vec![
                "ic_ancil".to_owned(),
                "ifsdata".to_owned(),
                "clim_data".to_owned(),
            ],
            legacy_descriptor: false,
        }
    }
}

impl FixtureCatalog {
    /// Logical file name of the packaged payload for `dataset`.
    pub fn payload_name(dataset: &str) -> String {
        format!("jf_{dataset}")
    }

    /// Placeholder file through which a controller finds `dataset`.
    pub fn placeholder_name(dataset: &str) -> String {
        format!("{dataset}_0.zip")
    }
}

/// One `&NAME ... /` namelist group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamelistGroup {
    pub name: String,
    pub entries: IndexMap<String, String>,
}

impl NamelistGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: IndexMap::new(),
        }
    }

    pub fn entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

/// Contents of the `fort.4` run-configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfiguration {
    /// Flat `!KEY=VALUE` directives, rendered first.
    pub directives: IndexMap<String, String>,
    pub groups: Vec<NamelistGroup>,
}

impl Default for RunConfiguration {
    fn default() -> Self {
        let directives = [
            ("WU_TEMPLATE_VERSION", "43r3-seasonal-20250801"),
            ("EXPTID", "NNNN"),
            ("UNIQUE_MEMBER_ID", "1353"),
            ("IFSDATA_FILE", "ifsdata_0"),
            ("IC_ANCIL_FILE", "ic_ancil_0"),
            ("CLIMATE_DATA_FILE", "clim_data_0"),
            ("HORIZ_RESOLUTION", "159"),
            ("VERT_RESOLUTION", "91"),
            ("GRID_TYPE", "l_2"),
            ("UPLOAD_INTERVAL", "288.0"),
            ("TSTEP", "3600"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .collect();
        let namct0 = NamelistGroup::new("NAMCT0")
            .entry("UTSTEP", "3600.0")
            .entry("NFRPOS", "1")
            .entry("NFRRES", "1");
        Self {
            directives,
            groups: vec![namct0],
        }
    }
}

impl RunConfiguration {
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.directives {
            out.push_str(&format!("!{key}={value}\n"));
        }
        for group in &self.groups {
            out.push_str(&format!("&{}\n", group.name));
            for (key, value) in &group.entries {
                out.push_str(&format!(" {key}={value},\n"));
            }
            out.push_str("/\n");
        }
        out
    }

    /// Set `key` inside `group`, creating the group when missing.
    pub fn set(&mut self, group: &str, key: impl Into<String>, value: impl Into<String>) {
        match self.groups.iter_mut().find(|g| g.name == group) {
            Some(existing) => {
                existing.entries.insert(key.into(), value.into());
            }
            None => self
                .groups
                .push(NamelistGroup::new(group).entry(key, value)),
        }
    }
}

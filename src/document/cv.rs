/// A controlled vocabulary that terms elsewhere in the document reference by `id`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Cv {
    pub id: String,
    pub full_name: String,
    pub uri: String,
    pub version: Option<String>,
}

impl Cv {
    pub fn new<I: Into<String>, N: Into<String>, U: Into<String>>(
        id: I,
        full_name: N,
        uri: U,
        version: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            uri: uri.into(),
            version,
        }
    }

    pub fn psi_ms() -> Self {
        Self::new(
            "PSI-MS",
            "PSI-MS",
            "https://raw.githubusercontent.com/HUPO-PSI/psi-ms-CV/master/psi-ms.obo",
            Some("4.1.57".into()),
        )
    }

    pub fn unimod() -> Self {
        Self::new("UNIMOD", "UNIMOD", "http://www.unimod.org/obo/unimod.obo", None)
    }

    pub fn unit_ontology() -> Self {
        Self::new(
            "UO",
            "UNIT-ONTOLOGY",
            "https://raw.githubusercontent.com/bio-ontology-research-group/unit-ontology/master/unit.obo",
            None,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CvList {
    pub cvs: Vec<Cv>,
}

impl CvList {
    /// The PSI-MS, UNIMOD and UO vocabularies that nearly every document uses
    pub fn with_defaults() -> Self {
        Self {
            cvs: vec![Cv::psi_ms(), Cv::unimod(), Cv::unit_ontology()],
        }
    }

    pub fn push(&mut self, cv: Cv) {
        self.cvs.push(cv)
    }

    pub fn get(&self, id: &str) -> Option<&Cv> {
        self.cvs.iter().find(|cv| cv.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cv> {
        self.cvs.iter()
    }

    pub fn len(&self) -> usize {
        self.cvs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cvs.is_empty()
    }
}

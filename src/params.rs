use std::borrow::Cow;
use std::fmt::Display;
use std::str::{self, FromStr};

/// Split a CURIE like `MS:1000040` into its vocabulary and numeric accession.
pub fn curie_to_num(curie: &str) -> (Option<ControlledVocabulary>, Option<u32>) {
    let mut parts = curie.split(':');
    let prefix = match parts.next() {
        Some(v) => v
            .parse::<ControlledVocabulary>()
            .ok()
            .and_then(|cv| cv.as_option()),
        None => None,
    };
    match parts.next().map(|k| k.trim().parse::<u32>()) {
        Some(Ok(v)) => (prefix, Some(v)),
        _ => (prefix, None),
    }
}

pub trait ParamLike {
    fn name(&self) -> &str;
    fn value(&self) -> &str;
    fn accession(&self) -> Option<u32>;
    fn controlled_vocabulary(&self) -> Option<ControlledVocabulary>;
    fn unit(&self) -> Unit;

    fn coerce<T: str::FromStr>(&self) -> Result<T, T::Err> {
        self.value().parse::<T>()
    }

    /// Only params from a known vocabulary count, an `Unknown` one has no `cvRef`
    fn is_controlled(&self) -> bool {
        self.curie().is_some()
    }

    fn curie(&self) -> Option<String> {
        match (
            self.controlled_vocabulary().and_then(|cv| cv.as_option()),
            self.accession(),
        ) {
            (Some(cv), Some(acc)) => Some(cv.format_accession(acc)),
            _ => None,
        }
    }
}

/// A controlled or uncontrolled term. Uncontrolled params are written out
/// as `userParam`, controlled ones as `cvParam`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Param {
    pub name: String,
    pub value: String,
    pub accession: Option<u32>,
    pub controlled_vocabulary: Option<ControlledVocabulary>,
    pub unit: Unit,
}

impl Param {
    pub fn new() -> Param {
        Param {
            ..Default::default()
        }
    }

    pub fn new_key_value<K: Into<String>, V: ToString>(name: K, value: V) -> Param {
        let mut inst = Self::new();
        inst.name = name.into();
        inst.value = value.to_string();
        inst
    }

    pub fn with_unit<S: AsRef<str>, A: AsRef<str>>(mut self, accession: S, name: A) -> Param {
        self.unit = Unit::from_accession(accession.as_ref());
        if matches!(self.unit, Unit::Unknown) {
            self.unit = Unit::from_name(name.as_ref());
        }
        self
    }

    pub fn with_unit_t(mut self, unit: &Unit) -> Param {
        self.unit = *unit;
        self
    }
}

impl ParamLike for Param {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn accession(&self) -> Option<u32> {
        self.accession
    }

    fn controlled_vocabulary(&self) -> Option<ControlledVocabulary> {
        self.controlled_vocabulary
    }

    fn unit(&self) -> Unit {
        self.unit
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControlledVocabulary {
    MS,
    UO,
    UNIMOD,
    Unknown,
}

const MS_CV: &str = "MS";
const UO_CV: &str = "UO";
const UNIMOD_CV: &str = "UNIMOD";

const MS_CV_REF: &str = "PSI-MS";

impl ControlledVocabulary {
    /// The prefix used when writing an accession number as a CURIE
    pub fn prefix(&self) -> Cow<'static, str> {
        match &self {
            Self::MS => Cow::Borrowed(MS_CV),
            Self::UO => Cow::Borrowed(UO_CV),
            Self::UNIMOD => Cow::Borrowed(UNIMOD_CV),
            Self::Unknown => Cow::Borrowed(""),
        }
    }

    /// The `id` of the matching `cv` entry in the document's `cvList`, which
    /// is what `cvRef` attributes point to.
    pub fn cv_ref(&self) -> &'static str {
        match &self {
            Self::MS => MS_CV_REF,
            Self::UO => UO_CV,
            Self::UNIMOD => UNIMOD_CV,
            Self::Unknown => "",
        }
    }

    pub fn as_option(&self) -> Option<Self> {
        match self {
            Self::Unknown => None,
            _ => Some(*self),
        }
    }

    pub fn format_accession(&self, accession: u32) -> String {
        match self {
            // Unimod accessions are not zero-padded
            Self::UNIMOD => format!("{}:{}", self.prefix(), accession),
            _ => format!("{}:{:07}", self.prefix(), accession),
        }
    }

    /// Build a term from this vocabulary.
    ///
    /// If `accession` does not carry a numeric part the param is left
    /// without an accession, and will be written as a `userParam`.
    pub fn param<A: AsRef<str>, S: Into<String>>(&self, accession: A, name: S) -> Param {
        let mut param = Param::new();
        param.name = name.into();
        let (_, acc) = curie_to_num(accession.as_ref());
        if acc.is_some() {
            param.controlled_vocabulary = Some(*self);
            param.accession = acc;
        }
        param
    }

    pub fn param_val<S: Into<String>, A: AsRef<str>, V: ToString>(
        &self,
        accession: A,
        name: S,
        value: V,
    ) -> Param {
        let mut param = self.param(accession, name);
        param.value = value.to_string();
        param
    }
}

#[derive(Debug, Clone)]
pub enum ControlledVocabularyResolutionError {}

impl Display for ControlledVocabularyResolutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(format!("{:?}", self).as_str())
    }
}

impl FromStr for ControlledVocabulary {
    type Err = ControlledVocabularyResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MS" | "PSI-MS" => Ok(Self::MS),
            "UO" => Ok(Self::UO),
            "UNIMOD" => Ok(Self::UNIMOD),
            _ => Ok(Self::Unknown),
        }
    }
}

pub type ParamList = Vec<Param>;

pub trait ParamDescribed {
    fn params(&self) -> &ParamList;
    fn params_mut(&mut self) -> &mut ParamList;

    fn add_param(&mut self, param: Param) {
        self.params_mut().push(param);
    }

    fn remove_param(&mut self, index: usize) -> Param {
        self.params_mut().remove(index)
    }

    fn get_param_by_name(&self, name: &str) -> Option<&Param> {
        self.params().iter().find(|param| param.name == name)
    }

    fn get_param_by_accession(&self, accession: &str) -> Option<&Param> {
        let (cv, acc_num) = curie_to_num(accession);
        self.params()
            .iter()
            .find(|param| param.accession == acc_num && param.controlled_vocabulary == cv)
    }
}

#[macro_export]
macro_rules! impl_param_described {
    ($($t:ty), +) => {$(

        impl $crate::params::ParamDescribed for $t {
            fn params(&self) -> &$crate::params::ParamList {
                return &self.params
            }

            fn params_mut(&mut self) -> &mut $crate::params::ParamList {
                return &mut self.params
            }
        }
    )+};
}

/// Units that a term's value might have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    // Mass
    MZ,
    Dalton,
    PartsPerMillion,

    // Time
    Minute,
    Second,

    #[default]
    Unknown,
}

impl Unit {
    pub fn for_param(&self) -> (&'static str, &'static str) {
        match self {
            Self::Second => ("UO:0000010", "second"),
            Self::Minute => ("UO:0000031", "minute"),

            Self::MZ => ("MS:1000040", "m/z"),
            Self::Dalton => ("UO:0000221", "dalton"),
            Self::PartsPerMillion => ("UO:0000169", "parts per million"),

            Self::Unknown => ("", ""),
        }
    }

    pub fn from_name(name: &str) -> Unit {
        match name {
            "second" => Self::Second,
            "minute" => Self::Minute,

            "m/z" => Self::MZ,
            "dalton" | "Da" => Self::Dalton,
            "parts per million" | "ppm" => Self::PartsPerMillion,
            _ => Unit::Unknown,
        }
    }

    pub fn from_accession(acc: &str) -> Unit {
        match acc {
            "UO:0000010" => Self::Second,
            "UO:0000031" => Self::Minute,

            "MS:1000040" => Self::MZ,
            "UO:0000221" => Self::Dalton,
            "UO:0000169" => Self::PartsPerMillion,
            _ => Unit::Unknown,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_curie_formatting() {
        let p = ControlledVocabulary::MS.param("MS:1001083", "ms-ms search");
        assert_eq!(p.curie().as_deref(), Some("MS:1001083"));
        assert!(p.is_controlled());

        let p = ControlledVocabulary::UO.param("UO:221", "dalton");
        assert_eq!(p.curie().as_deref(), Some("UO:0000221"));

        let p = ControlledVocabulary::UNIMOD.param("UNIMOD:35", "Oxidation");
        assert_eq!(p.curie().as_deref(), Some("UNIMOD:35"));
    }

    #[test]
    fn test_malformed_accession_is_uncontrolled() {
        let p = ControlledVocabulary::MS.param_val("MS:notanumber", "score", 12.5);
        assert!(!p.is_controlled());
        assert_eq!(p.curie(), None);
        assert_eq!(p.value, "12.5");
    }

    #[test]
    fn test_unknown_vocabulary_is_uncontrolled() {
        let mut p = Param::new_key_value("bar", "");
        p.controlled_vocabulary = Some(ControlledVocabulary::Unknown);
        p.accession = Some(12);
        assert_eq!(p.curie(), None);
        assert!(!p.is_controlled());
    }

    #[test]
    fn test_cv_resolution() {
        assert_eq!(
            "PSI-MS".parse::<ControlledVocabulary>().unwrap(),
            ControlledVocabulary::MS
        );
        assert_eq!(ControlledVocabulary::MS.cv_ref(), "PSI-MS");
        assert_eq!(
            curie_to_num("UNIMOD:4"),
            (Some(ControlledVocabulary::UNIMOD), Some(4))
        );
        assert_eq!(curie_to_num("foo:bar"), (None, None));
    }

    #[test]
    fn test_units() {
        let p = ControlledVocabulary::MS
            .param_val("MS:1001412", "search tolerance minus value", 0.5)
            .with_unit("UO:0000221", "dalton");
        assert_eq!(p.unit, Unit::Dalton);
        let p = p.with_unit("", "ppm");
        assert_eq!(p.unit, Unit::PartsPerMillion);
        assert_eq!(p.unit.for_param(), ("UO:0000169", "parts per million"));
    }

    #[test]
    fn test_param_described() {
        #[derive(Default)]
        struct Holder {
            params: ParamList,
        }
        crate::impl_param_described!(Holder);

        let mut h = Holder::default();
        h.add_param(ControlledVocabulary::MS.param_val("MS:1002049", "MS-GF:RawScore", 95));
        h.add_param(Param::new_key_value("note", "hello"));
        assert_eq!(
            h.get_param_by_accession("MS:1002049").map(|p| p.coerce::<i32>().unwrap()),
            Some(95)
        );
        assert_eq!(h.get_param_by_name("note").unwrap().value, "hello");
        let removed = h.remove_param(0);
        assert_eq!(removed.name, "MS-GF:RawScore");
        assert_eq!(h.params().len(), 1);
    }
}

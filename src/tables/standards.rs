//! Malaysian electrical standards referenced by the compliance checker.

use std::sync::LazyLock;

use serde::{Serialize, Serializer};

/// A requirement leaf or a named group of requirements. Groups keep their
/// published order and serialise as JSON objects.
#[derive(Debug, Clone, PartialEq)]
pub enum RequirementNode {
    Text(&'static str),
    Group(Vec<(&'static str, RequirementNode)>),
}

impl Serialize for RequirementNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(t) => serializer.serialize_str(t),
            Self::Group(children) => {
                serializer.collect_map(children.iter().map(|(key, node)| (*key, node)))
            }
        }
    }
}

impl RequirementNode {
    fn group<const N: usize>(entries: [(&'static str, RequirementNode); N]) -> Self {
        Self::Group(Vec::from(entries))
    }

    /// Follows a path of group keys, e.g. `["earthing", "resistance"]`.
    pub fn get(&self, path: &[&str]) -> Option<&RequirementNode> {
        let Some((head, rest)) = path.split_first() else {
            return Some(self);
        };
        match self {
            Self::Group(children) => children
                .iter()
                .find(|(key, _)| key == head)
                .and_then(|(_, node)| node.get(rest)),
            Self::Text(_) => None,
        }
    }

    /// Leaf text, `None` for groups.
    pub fn text(&self) -> Option<&'static str> {
        match self {
            Self::Text(t) => Some(*t),
            Self::Group(_) => None,
        }
    }
}

/// A published standard and its requirement tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandardDefinition {
    pub code: &'static str,
    pub title: &'static str,
    pub requirements: RequirementNode,
}

/// Every known standard in publication order. Serialises as an object keyed
/// by standard code.
#[derive(Debug)]
pub struct StandardsCatalogue(Vec<StandardDefinition>);

impl StandardsCatalogue {
    pub fn get(&self, code: &str) -> Option<&StandardDefinition> {
        self.0.iter().find(|s| s.code == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StandardDefinition> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for StandardsCatalogue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|s| (s.code, s)))
    }
}

static STANDARDS: LazyLock<StandardsCatalogue> = LazyLock::new(|| {
    use RequirementNode::Text;

    let defs = [
        StandardDefinition {
            code: "MS IEC 60364",
            title: "Electrical Installations of Buildings",
            requirements: RequirementNode::group([
                (
                    "voltage",
                    RequirementNode::group([
                        ("lowVoltage", Text("230/400V")),
                        ("highVoltage", Text("11kV/33kV")),
                    ]),
                ),
                (
                    "protection",
                    RequirementNode::group([
                        ("overcurrent", Text("Required for all circuits")),
                        ("earthFault", Text("30mA RCD for socket circuits")),
                        ("surgeProtection", Text("Type 1 for main distribution")),
                    ]),
                ),
            ]),
        },
        StandardDefinition {
            code: "ST 1:2014",
            title: "Code of Practice for Electrical Wiring Installations",
            requirements: RequirementNode::group([
                (
                    "wiring",
                    RequirementNode::group([
                        ("conductorSize", Text("Minimum 1.5mm² for lighting")),
                        ("insulation", Text("PVC insulated cables")),
                        ("colorCoding", Text("Standard IEC color codes")),
                    ]),
                ),
                (
                    "earthing",
                    RequirementNode::group([
                        ("systemType", Text("TN-S or TN-C-S")),
                        ("resistance", Text("Maximum 1 ohm")),
                    ]),
                ),
            ]),
        },
        StandardDefinition {
            code: "MS 1979:2015",
            title: "Electrical Equipment of Machines",
            requirements: RequirementNode::group([(
                "safety",
                RequirementNode::group([
                    ("ipRating", Text("Minimum IP54 for outdoor equipment")),
                    ("temperature", Text("Maximum 40°C ambient")),
                ]),
            )]),
        },
    ];
    StandardsCatalogue(Vec::from(defs))
});

/// All known standards, in publication order.
pub fn tnb_standards() -> &'static StandardsCatalogue {
    &STANDARDS
}

/// Requirements for one standard; `None` when the code is not recognised.
pub fn standard_requirements(code: &str) -> Option<&'static StandardDefinition> {
    STANDARDS.get(code)
}

/// Codes of every known standard, in publication order.
pub fn standard_codes() -> Vec<String> {
    STANDARDS.iter().map(|s| s.code.to_string()).collect()
}

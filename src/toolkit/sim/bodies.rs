//! Built-in body name/ID bindings.
//!
//! The first name listed for an ID is its canonical name; the others are
//! accepted aliases. Lookups are case-insensitive and treat runs of blanks as
//! one space, canonical names are returned in upper case.
use crate::constants::NaifId;

pub(crate) const BUILTIN_BODIES: &[(NaifId, &[&str])] = &[
    (0, &["SOLAR SYSTEM BARYCENTER", "SSB", "SOLAR_SYSTEM_BARYCENTER"]),
    (1, &["MERCURY BARYCENTER"]),
    (2, &["VENUS BARYCENTER"]),
    (
        3,
        &[
            "EARTH BARYCENTER",
            "EMB",
            "EARTH MOON BARYCENTER",
            "EARTH-MOON BARYCENTER",
        ],
    ),
    (4, &["MARS BARYCENTER"]),
    (5, &["JUPITER BARYCENTER"]),
    (6, &["SATURN BARYCENTER"]),
    (7, &["URANUS BARYCENTER"]),
    (8, &["NEPTUNE BARYCENTER"]),
    (9, &["PLUTO BARYCENTER"]),
    (10, &["SUN"]),
    (199, &["MERCURY"]),
    (299, &["VENUS"]),
    (399, &["EARTH"]),
    (301, &["MOON"]),
    (499, &["MARS"]),
    (401, &["PHOBOS"]),
    (402, &["DEIMOS"]),
    (599, &["JUPITER"]),
    (501, &["IO"]),
    (502, &["EUROPA"]),
    (503, &["GANYMEDE"]),
    (504, &["CALLISTO"]),
    (699, &["SATURN"]),
    (606, &["TITAN"]),
    (799, &["URANUS"]),
    (899, &["NEPTUNE"]),
    (801, &["TRITON"]),
    (999, &["PLUTO"]),
    (901, &["CHARON"]),
];

/// Upper-case and collapse whitespace, the comparison form of a body name.
pub(crate) fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn builtin_id(name: &str) -> Option<NaifId> {
    let wanted = normalize_name(name);
    BUILTIN_BODIES
        .iter()
        .find(|(_, names)| names.iter().any(|n| *n == wanted))
        .map(|(id, _)| *id)
}

pub(crate) fn builtin_name(id: NaifId) -> Option<&'static str> {
    BUILTIN_BODIES
        .iter()
        .find(|(code, _)| *code == id)
        .map(|(_, names)| names[0])
}

#[cfg(test)]
mod test_bodies {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(builtin_id("Earth Barycenter"), Some(3));
        assert_eq!(builtin_id("  solar   system barycenter "), Some(0));
        assert_eq!(builtin_id("ssb"), Some(0));
        assert_eq!(builtin_id("NonexistentObject"), None);
        assert_eq!(builtin_name(3), Some("EARTH BARYCENTER"));
        assert_eq!(builtin_name(301), Some("MOON"));
        assert_eq!(builtin_name(101), None);
    }

    #[test]
    fn test_every_canonical_name_round_trips() {
        for (id, names) in BUILTIN_BODIES {
            assert_eq!(builtin_id(names[0]), Some(*id));
            assert_eq!(builtin_name(*id), Some(names[0]));
        }
    }
}

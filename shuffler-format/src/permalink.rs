use log::debug;
use shuffler_core::{validate_count, Face, Seed, Shuffle, ShuffleError};
use thiserror::Error;
use url::{form_urlencoded, ParseError, Url};

/// Error type for permalink parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PermalinkError {
    #[error("permalink has no fragment")]
    MissingFragment,

    #[error("permalink is missing the {0:?} field")]
    MissingField(&'static str),

    #[error("invalid item count {0:?}")]
    InvalidNumber(String),

    #[error("invalid URL {0:?}")]
    InvalidUrl(String),

    #[error(transparent)]
    Shuffle(#[from] ShuffleError),
}

/// Everything needed to rebuild a shuffle: count, face and seed
///
/// Shared as a URL fragment: `#number=52&face=card&seed=123456`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permalink {
    pub number: usize,
    pub face: Face,
    pub seed: Seed,
}

/// The fragment of `input`: read from the parsed URL when it has a scheme,
/// otherwise whatever follows `#`, or `input` itself when it is a bare fragment.
fn fragment_of(input: &str) -> Result<String, PermalinkError> {
    let fragment = match Url::parse(input) {
        Ok(url) => url.fragment().unwrap_or_default().to_string(),
        Err(ParseError::RelativeUrlWithoutBase) => match input.split_once('#') {
            Some((_, fragment)) => fragment.to_string(),
            // A path or query without a fragment names no shuffle
            None if input.contains(&['/', '?'][..]) => {
                return Err(PermalinkError::MissingFragment);
            }
            None => input.to_string(),
        },
        Err(_) => return Err(PermalinkError::InvalidUrl(input.to_string())),
    };

    if fragment.is_empty() {
        return Err(PermalinkError::MissingFragment);
    }
    Ok(fragment)
}

impl Permalink {
    pub fn new(shuffle: &Shuffle, face: Face) -> Self {
        Permalink {
            number: shuffle.count(),
            face,
            seed: shuffle.seed().clone(),
        }
    }

    /// Format as `number=N&face=F&seed=S`
    pub fn to_fragment(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("number", &self.number.to_string())
            .append_pair("face", self.face.as_str())
            .append_pair("seed", &self.seed.to_string())
            .finish()
    }

    /// Attach the fragment to `base`, replacing any fragment it already has.
    ///
    /// `base` must be an absolute URL.
    pub fn to_url(&self, base: &str) -> Result<String, PermalinkError> {
        let mut url =
            Url::parse(base).map_err(|_| PermalinkError::InvalidUrl(base.to_string()))?;
        url.set_fragment(Some(&self.to_fragment()));
        Ok(url.into())
    }

    /// Parse a permalink URL or a bare fragment.
    ///
    /// Only the fragment of a URL is read; its query string is not. Unknown
    /// keys are ignored and a repeated key keeps its last value. The count
    /// must be in `2..=100`, the face `card` or `number`, and the seed a
    /// decimal integer below `number!`.
    pub fn parse(input: &str) -> Result<Self, PermalinkError> {
        let fragment = fragment_of(input.trim())?;

        let mut number = None;
        let mut face = None;
        let mut seed = None;

        for (key, value) in form_urlencoded::parse(fragment.as_bytes()) {
            match key.as_ref() {
                "number" => {
                    let parsed = value
                        .parse::<usize>()
                        .map_err(|_| PermalinkError::InvalidNumber(value.to_string()))?;
                    number = Some(parsed);
                }
                "face" => face = Some(value.parse::<Face>()?),
                "seed" => seed = Some(value.parse::<Seed>()?),
                _ => debug!("ignoring permalink field {:?}", key),
            }
        }

        let number = number.ok_or(PermalinkError::MissingField("number"))?;
        let face = face.ok_or(PermalinkError::MissingField("face"))?;
        let seed = seed.ok_or(PermalinkError::MissingField("seed"))?;

        validate_count(number)?;
        seed.check_range(number)?;

        Ok(Permalink { number, face, seed })
    }

    /// Rebuild the shuffle this permalink names
    pub fn to_shuffle(&self) -> Result<Shuffle, ShuffleError> {
        Shuffle::from_seed(self.number, self.seed.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_round_trip() {
        let shuffle = Shuffle::from_seed(52, Seed::from(123_456_789)).unwrap();
        let link = Permalink::new(&shuffle, Face::Number);
        assert_eq!(link.to_fragment(), "number=52&face=number&seed=123456789");
        assert_eq!(Permalink::parse(&link.to_fragment()).unwrap(), link);
        assert_eq!(link.to_shuffle().unwrap(), shuffle);
    }

    #[test]
    fn test_parse_full_url() {
        let link =
            Permalink::parse("https://example.org/shuffle/?x=1#face=card&seed=17&number=4").unwrap();
        assert_eq!(link.number, 4);
        assert_eq!(link.face, Face::Card);
        assert_eq!(link.seed, Seed::from(17));
    }

    #[test]
    fn test_to_url_replaces_fragment() {
        let link = Permalink {
            number: 4,
            face: Face::Card,
            seed: Seed::from(5),
        };
        assert_eq!(
            link.to_url("https://example.org/#old").unwrap(),
            "https://example.org/#number=4&face=card&seed=5"
        );
    }

    #[test]
    fn test_to_url_rejects_relative_base() {
        let link = Permalink {
            number: 4,
            face: Face::Card,
            seed: Seed::from(1),
        };
        assert_eq!(
            link.to_url("not a url"),
            Err(PermalinkError::InvalidUrl("not a url".to_string()))
        );
        assert!(link.to_url("/shuffle/").is_err());
    }

    #[test]
    fn test_query_string_is_not_a_fragment() {
        assert_eq!(
            Permalink::parse("https://example.org/shuffle/?ref=mail&number=4&face=card&seed=17"),
            Err(PermalinkError::MissingFragment)
        );
        assert_eq!(
            Permalink::parse("https://example.org/shuffle/?number=4&face=card&seed=17"),
            Err(PermalinkError::MissingFragment)
        );
        assert_eq!(
            Permalink::parse("example.org/shuffle/?number=4&face=card&seed=17"),
            Err(PermalinkError::MissingFragment)
        );
    }

    #[test]
    fn test_relative_link() {
        let link = Permalink::parse("/shuffle/#number=4&face=card&seed=17").unwrap();
        assert_eq!(link.seed, Seed::from(17));
    }

    #[test]
    fn test_fragment_wins_over_query() {
        let link =
            Permalink::parse("https://example.org/?number=9&seed=1#number=4&face=number&seed=17")
                .unwrap();
        assert_eq!(link.number, 4);
        assert_eq!(link.face, Face::Number);
        assert_eq!(link.seed, Seed::from(17));
    }

    #[test]
    fn test_malformed_url() {
        assert_eq!(
            Permalink::parse("https://#number=4&face=card&seed=3"),
            Err(PermalinkError::InvalidUrl(
                "https://#number=4&face=card&seed=3".to_string()
            ))
        );
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let link = Permalink::parse("#number=4&theme=dark&face=card&seed=3").unwrap();
        assert_eq!(link.seed, Seed::from(3));
    }

    #[test]
    fn test_missing_fragment() {
        assert_eq!(
            Permalink::parse("https://example.org/"),
            Err(PermalinkError::MissingFragment)
        );
        assert_eq!(
            Permalink::parse("https://example.org/#"),
            Err(PermalinkError::MissingFragment)
        );
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            Permalink::parse("face=card&seed=3"),
            Err(PermalinkError::MissingField("number"))
        );
        assert_eq!(
            Permalink::parse("number=4&seed=3"),
            Err(PermalinkError::MissingField("face"))
        );
        assert_eq!(
            Permalink::parse("number=4&face=card"),
            Err(PermalinkError::MissingField("seed"))
        );
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            Permalink::parse("number=lots&face=card&seed=3"),
            Err(PermalinkError::InvalidNumber("lots".to_string()))
        );
        assert_eq!(
            Permalink::parse("number=1&face=card&seed=0"),
            Err(PermalinkError::Shuffle(ShuffleError::InvalidCount { count: 1 }))
        );
        assert_eq!(
            Permalink::parse("number=4&face=tarot&seed=3"),
            Err(PermalinkError::Shuffle(ShuffleError::InvalidFace(
                "tarot".to_string()
            )))
        );
        assert_eq!(
            Permalink::parse("number=4&face=card&seed=-3"),
            Err(PermalinkError::Shuffle(ShuffleError::InvalidSeedText(
                "-3".to_string()
            )))
        );
    }

    #[test]
    fn test_seed_out_of_range() {
        assert_eq!(
            Permalink::parse("number=4&face=card&seed=24"),
            Err(PermalinkError::Shuffle(ShuffleError::InvalidSeedRange {
                count: 4,
                seed: "24".to_string()
            }))
        );
    }
}

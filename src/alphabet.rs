//! Defines the mapping from key characters to child slots of a fixed-branching trie.
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::Error;

/// Marker for an ASCII character without a slot.
const NO_SLOT: u16 = u16::MAX;

static LOWERCASE: Lazy<Arc<Alphabet>> = Lazy::new(|| Arc::new(Alphabet::from_sorted(('a'..='z').collect())));

/// An ordered set of letters, each owning one child slot.
///
/// Letters are kept in ascending order so that slot order and lexicographic
/// order agree. ASCII letters resolve through a lookup table; anything else
/// falls back to a binary search over the sorted letters.
#[derive(Clone)]
pub struct Alphabet {
    letters: Vec<char>,
    ascii: [u16; 128],
}

impl Alphabet {
    /// Builds an alphabet from the given letters, in any order.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tries::Alphabet;
    ///
    /// let dna = Alphabet::new("TGCA".chars()).unwrap();
    /// assert_eq!(dna.len(), 4);
    /// assert_eq!(dna.index_of('A'), Some(0));
    /// assert_eq!(dna.letter(3), Some('T'));
    /// assert_eq!(dna.index_of('x'), None);
    /// ```
    pub fn new<I: IntoIterator<Item = char>>(letters: I) -> Result<Self, Error> {
        let mut letters: Vec<char> = letters.into_iter().collect();
        if letters.is_empty() {
            return Err(Error::EmptyAlphabet);
        }
        letters.sort_unstable();
        if let Some(pair) = letters.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(Error::DuplicateLetter(pair[0]));
        }
        Ok(Self::from_sorted(letters))
    }

    /// The shared 26-letter lowercase alphabet `a..=z`.
    pub fn lowercase() -> Arc<Alphabet> {
        Arc::clone(&LOWERCASE)
    }

    // Letters must be sorted and unique
    fn from_sorted(letters: Vec<char>) -> Self {
        let mut ascii = [NO_SLOT; 128];
        for (index, &ch) in letters.iter().enumerate() {
            if ch.is_ascii() {
                ascii[ch as usize] = index as u16;
            }
        }
        Alphabet { letters, ascii }
    }

    /// Returns the number of letters, which is the branching factor of every node
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Always `false`: construction rejects empty alphabets
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Returns the child slot for `ch`, if it is a letter of this alphabet
    pub fn index_of(&self, ch: char) -> Option<usize> {
        if ch.is_ascii() {
            match self.ascii[ch as usize] {
                NO_SLOT => None,
                index => Some(index as usize),
            }
        } else {
            self.letters.binary_search(&ch).ok()
        }
    }

    /// Returns the letter that owns slot `index`
    pub fn letter(&self, index: usize) -> Option<char> {
        self.letters.get(index).copied()
    }

    /// Returns whether `ch` is a letter of this alphabet
    pub fn contains(&self, ch: char) -> bool {
        self.index_of(ch).is_some()
    }

    /// Maps every character of a normalized key to its slot.
    ///
    /// Fails on the first character that is not a letter.
    pub fn indices(&self, key: &[char]) -> Result<Vec<usize>, Error> {
        key.iter()
            .enumerate()
            .map(|(position, &ch)| self.index_of(ch).ok_or(Error::InvalidCharacter { ch, position }))
            .collect()
    }

    /// Returns the letters in slot order
    pub fn letters(&self) -> &[char] {
        &self.letters
    }
}

impl std::fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Alphabet").field(&self.letters.iter().collect::<String>()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_alphabet() {
        let alphabet = Alphabet::lowercase();
        assert_eq!(alphabet.len(), 26);
        assert_eq!(alphabet.index_of('a'), Some(0));
        assert_eq!(alphabet.index_of('z'), Some(25));
        assert_eq!(alphabet.index_of('A'), None);
        assert_eq!(alphabet.index_of('.'), None);
        assert_eq!(alphabet.letter(1), Some('b'));
        assert_eq!(alphabet.letter(26), None);
    }

    #[test]
    fn test_lowercase_is_shared() {
        let first = Alphabet::lowercase();
        let second = Alphabet::lowercase();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_custom_alphabet_is_sorted() {
        let alphabet = Alphabet::new("zyx".chars()).unwrap();
        assert_eq!(alphabet.letters(), &['x', 'y', 'z']);
        assert_eq!(alphabet.index_of('z'), Some(2));
    }

    #[test]
    fn test_non_ascii_letters() {
        let alphabet = Alphabet::new("aéü".chars()).unwrap();
        assert_eq!(alphabet.index_of('a'), Some(0));
        assert_eq!(alphabet.index_of('é'), Some(1));
        assert_eq!(alphabet.index_of('ü'), Some(2));
        assert_eq!(alphabet.index_of('ö'), None);
    }

    #[test]
    fn test_rejects_bad_alphabets() {
        assert_eq!(Alphabet::new(std::iter::empty()).unwrap_err(), Error::EmptyAlphabet);
        assert_eq!(Alphabet::new("abca".chars()).unwrap_err(), Error::DuplicateLetter('a'));
    }

    #[test]
    fn test_indices() {
        let alphabet = Alphabet::lowercase();
        assert_eq!(alphabet.indices(&['c', 'a', 'b']), Ok(vec![2, 0, 1]));
        assert_eq!(
            alphabet.indices(&['c', '4', 'b']),
            Err(Error::InvalidCharacter { ch: '4', position: 1 })
        );
        assert_eq!(alphabet.indices(&[]), Ok(vec![]));
    }
}

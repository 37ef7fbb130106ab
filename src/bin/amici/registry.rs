//! The person registry, keyed by handle

use std::io;

use hashtab::{Callbacks, Table};
use log::{debug, trace};
use thiserror::Error;

/// Rejections reported back to the user; `Display` omits the `error: ` prefix
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Another person already owns the handle
    #[error("handle \"{0}\" is already in use")]
    HandleInUse(String),
    /// A name is not alphabetic or a handle is not alphanumeric
    #[error("argument \"{0}\" is invalid")]
    InvalidArgument(String),
    /// No person has the handle
    #[error("handle \"{0}\" is unknown")]
    UnknownHandle(String),
    /// Both handles name the same person
    #[error("\"{0}\" and \"{1}\" are the same person")]
    SamePerson(String, String),
}

/// A registered person
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// Full name, `first last`
    name: String,
    /// Unique handle, also the registry key
    handle: String,
    /// Handles of this person's friends, in the order the friendships formed
    friends: Vec<String>,
}

impl Person {
    /// Number of friends
    fn friend_count(&self) -> usize {
        self.friends.len()
    }

    /// `handle (Name) has N friends`
    fn summary(&self) -> String {
        let count = match self.friend_count() {
            0 => "no friends".to_string(),
            1 => "1 friend".to_string(),
            n => format!("{n} friends"),
        };
        format!("{} ({}) has {count}", self.handle, self.name)
    }
}

/// djb2 over the bytes of a string
fn str_hash(key: &String) -> u64 {
    key.bytes().fold(5381_u64, |hash, byte| hash.wrapping_mul(33).wrapping_add(u64::from(byte)))
}

/// Table behaviors for a handle-keyed registry
fn person_callbacks() -> Callbacks<String, Person> {
    Callbacks::new(
        str_hash,
        |a: &String, b: &String| a == b,
        |handle: &String, person: &Person, out: &mut dyn io::Write| {
            write!(out, "{handle}, {}", person.name)
        },
    )
}

/// People and friendships of one session
#[derive(Debug)]
pub struct Registry {
    /// People by handle
    people: Table<String, Person>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self { people: Table::new(person_callbacks()) }
    }

    /// Number of registered people
    #[must_use]
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// Registers a new person.
    ///
    /// # Errors
    ///
    /// The handle must be unused, both names alphabetic and the handle
    /// alphanumeric, checked in that order.
    pub fn add(&mut self, first: &str, last: &str, handle: &str) -> Result<(), RegistryError> {
        let key = handle.to_string();
        if self.people.has(&key) {
            return Err(RegistryError::HandleInUse(key));
        }
        for name in [first, last] {
            if !name.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(RegistryError::InvalidArgument(name.to_string()));
            }
        }
        if !handle.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(RegistryError::InvalidArgument(key));
        }

        let person =
            Person { name: format!("{first} {last}"), handle: key.clone(), friends: Vec::new() };
        self.people.put(key, person);
        debug!("registered {handle}, {} people", self.len());
        Ok(())
    }

    /// Makes two people friends with each other.
    ///
    /// # Errors
    ///
    /// Both handles must be known and distinct.
    pub fn befriend(&mut self, first: &str, second: &str) -> Result<String, RegistryError> {
        let (a, b) = self.known_pair(first, second)?;
        if self.people.get(&a).friends.contains(&b) {
            return Ok(format!("{first} and {second} are already friends."));
        }

        self.people.get_mut(&a).friends.push(b.clone());
        self.people.get_mut(&b).friends.push(a);
        Ok(format!("{first} and {second} are now friends."))
    }

    /// Ends the friendship between two people.
    ///
    /// # Errors
    ///
    /// Both handles must be known and distinct.
    pub fn unfriend(&mut self, first: &str, second: &str) -> Result<String, RegistryError> {
        let (a, b) = self.known_pair(first, second)?;
        let was_friend = remove_friend(self.people.get_mut(&a), &b);
        remove_friend(self.people.get_mut(&b), &a);

        if was_friend {
            Ok(format!("{first} and {second} are no longer friends."))
        } else {
            Ok(format!("{first} and {second} are not friends."))
        }
    }

    /// The summary line of a person followed by one tab-indented line per
    /// friend.
    ///
    /// # Errors
    ///
    /// The handle must be known.
    pub fn describe(&self, handle: &str) -> Result<String, RegistryError> {
        let person = self.lookup(handle)?;
        let mut lines = vec![person.summary()];
        for friend in &person.friends {
            if let Ok(other) = self.people.try_get(friend) {
                lines.push(format!("\t{} ({})", other.handle, other.name));
            }
        }
        Ok(lines.join("\n"))
    }

    /// The summary line of a person.
    ///
    /// # Errors
    ///
    /// The handle must be known.
    pub fn size_of(&self, handle: &str) -> Result<String, RegistryError> {
        self.lookup(handle).map(Person::summary)
    }

    /// Population and friendship counts
    #[must_use]
    pub fn stats(&self) -> String {
        let people = self.len();
        let friendships = self
            .people
            .values()
            .into_iter()
            .map(Person::friend_count)
            .fold(0_usize, usize::saturating_add)
            / 2;

        let body = match (people, friendships) {
            (0, _) => "no people, no friendships".to_string(),
            (1, _) => "1 person, no friendships".to_string(),
            (n, 0) => format!("{n} people, no friendships"),
            (n, 1) => format!("{n} people, 1 friendship"),
            (n, m) => format!("{n} people, {m} friendships"),
        };
        format!("Statistics:  {body}")
    }

    /// Drops every person and starts over with a fresh table
    pub fn reset(&mut self) {
        let previous = std::mem::replace(&mut self.people, Table::new(person_callbacks()));
        trace!("reset registry, discarded {} people", previous.len());
        previous.destroy();
    }

    /// Writes the diagnostic dump of the underlying table
    ///
    /// # Errors
    ///
    /// Propagates errors from `out`.
    pub fn dump<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        self.people.dump(out, true)
    }

    /// Looks up a person by handle
    fn lookup(&self, handle: &str) -> Result<&Person, RegistryError> {
        self.people
            .try_get(&handle.to_string())
            .map_err(|_| RegistryError::UnknownHandle(handle.to_string()))
    }

    /// Validates the two handles of a friendship command
    fn known_pair(&self, first: &str, second: &str) -> Result<(String, String), RegistryError> {
        let a = first.to_string();
        let b = second.to_string();
        if !self.people.has(&a) {
            return Err(RegistryError::UnknownHandle(a));
        }
        if !self.people.has(&b) {
            return Err(RegistryError::UnknownHandle(b));
        }
        if a == b {
            return Err(RegistryError::SamePerson(a, b));
        }
        Ok((a, b))
    }
}

/// Removes `handle` from the friends of `person`, returning whether it was there
fn remove_friend(person: &mut Person, handle: &str) -> bool {
    let before = person.friends.len();
    person.friends.retain(|friend| friend != handle);
    person.friends.len() != before
}

use crate::pieces::PieceId;

/// The pieces fighting for one side (or, for walls, for nobody), in the order they joined.
/// Removal reports the position the piece held so that an undo can put it back exactly where it
/// was.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Roster {
    members: Vec<PieceId>
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a piece to the end of the roster.
    pub fn add(&mut self, id: PieceId) {
        self.members.push(id);
    }

    /// Remove a piece, returning the index it occupied, or `None` if it was not a member.
    pub fn remove(&mut self, id: PieceId) -> Option<usize> {
        let index = self.members.iter().position(|&m| m == id)?;
        self.members.remove(index);
        Some(index)
    }

    /// Put a piece back at the given index. Indices past the end append.
    pub fn insert(&mut self, index: usize, id: PieceId) {
        let index = index.min(self.members.len());
        self.members.insert(index, id);
    }

    pub fn contains(&self, id: PieceId) -> bool {
        self.members.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = PieceId> + '_ {
        self.members.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }
}

#[cfg(test)]
mod tests {
    use crate::pieces::PieceId;
    use crate::roster::Roster;

    #[test]
    fn test_remove_and_reinsert() {
        let mut r = Roster::new();
        for i in 0..4 {
            r.add(PieceId(i));
        }
        let before = r.clone();
        let idx = r.remove(PieceId(2)).unwrap();
        assert_eq!(idx, 2);
        assert!(!r.contains(PieceId(2)));
        assert_eq!(r.len(), 3);
        assert_eq!(r.remove(PieceId(2)), None);
        r.insert(idx, PieceId(2));
        assert_eq!(r, before);
    }

    #[test]
    fn test_insert_past_end() {
        let mut r = Roster::new();
        r.insert(5, PieceId(7));
        assert_eq!(r.iter().collect::<Vec<_>>(), vec![PieceId(7)]);
        r.clear();
        assert!(r.is_empty());
    }
}

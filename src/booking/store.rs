use dashmap::DashMap;

use super::wizard::{Wizard, WizardError};

/// One in-progress wizard per user, kept in memory only.
pub struct WizardStore {
    drafts: DashMap<i64, Wizard>,
}

impl WizardStore {
    pub fn new() -> Self {
        Self {
            drafts: DashMap::new(),
        }
    }

    /// Starts over, replacing any unfinished draft.
    pub fn start(&self, user_id: i64, wizard: Wizard) -> Wizard {
        self.drafts.insert(user_id, wizard.clone());
        wizard
    }

    pub fn get(&self, user_id: i64) -> Result<Wizard, WizardError> {
        self.drafts
            .get(&user_id)
            .map(|entry| entry.value().clone())
            .ok_or(WizardError::NoDraft)
    }

    /// Applies `f` to the user's draft and returns the updated snapshot.
    /// On error the draft is left as it was.
    pub fn update<F>(&self, user_id: i64, f: F) -> Result<Wizard, WizardError>
    where
        F: FnOnce(&mut Wizard) -> Result<(), WizardError>,
    {
        let mut entry = self.drafts.get_mut(&user_id).ok_or(WizardError::NoDraft)?;
        let mut draft = entry.value().clone();
        f(&mut draft)?;
        *entry.value_mut() = draft.clone();
        Ok(draft)
    }

    pub fn discard(&self, user_id: i64) -> Option<Wizard> {
        self.drafts.remove(&user_id).map(|(_, wizard)| wizard)
    }
}

impl Default for WizardStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_update_leaves_draft_untouched() {
        let store = WizardStore::new();
        store.start(1, Wizard::new());

        let result = store.update(1, |w| {
            w.set_specifications("half done")?;
            w.next().map(|_| ())
        });
        assert_eq!(result, Err(WizardError::NoServiceSelected));
        assert_eq!(store.get(1).unwrap().specifications(), "");
    }

    #[test]
    fn drafts_are_per_user() {
        let store = WizardStore::new();
        store.start(1, Wizard::new());
        assert_eq!(store.get(2), Err(WizardError::NoDraft));
        assert!(store.discard(1).is_some());
        assert_eq!(store.get(1), Err(WizardError::NoDraft));
    }
}

use log::warn;
use std::collections::HashSet;
use std::sync::Arc;

use crate::accounts::AccountRepositoryTrait;
use crate::constants::{MAX_REFERRAL_DEPTH, MAX_TREE_NODES};
use crate::errors::Result;

use super::referrals_model::ReferralNode;

/// Builds bounded-depth downline views over the sponsor relation.
/// Pure read; never mutates state.
pub struct ReferralService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
}

impl ReferralService {
    pub fn new(account_repository: Arc<dyn AccountRepositoryTrait>) -> Self {
        Self { account_repository }
    }

    /// Expands the direct and indirect referrals of an account, up to
    /// `max_depth` levels (capped at MAX_REFERRAL_DEPTH) and at most
    /// MAX_TREE_NODES nodes in total. Returns the root's referral forest.
    pub fn build_tree(&self, root_account_id: &str, max_depth: usize) -> Result<Vec<ReferralNode>> {
        let depth = max_depth.min(MAX_REFERRAL_DEPTH);

        // The sponsor relation is set once at registration and never
        // re-parented, so it is acyclic by construction; the visited set
        // guards the traversal anyway.
        let mut visited = HashSet::new();
        visited.insert(root_account_id.to_string());
        let mut remaining = MAX_TREE_NODES;

        self.expand(root_account_id, 1, depth, &mut visited, &mut remaining)
    }

    fn expand(
        &self,
        account_id: &str,
        level: usize,
        max_depth: usize,
        visited: &mut HashSet<String>,
        remaining: &mut usize,
    ) -> Result<Vec<ReferralNode>> {
        if level > max_depth {
            return Ok(Vec::new());
        }

        let mut nodes = Vec::new();
        for referral in self.account_repository.list_by_sponsor(account_id)? {
            if *remaining == 0 {
                warn!(
                    "Referral tree for {} truncated at {} nodes",
                    account_id, MAX_TREE_NODES
                );
                break;
            }
            if !visited.insert(referral.id.clone()) {
                continue;
            }
            *remaining -= 1;

            let children = self.expand(&referral.id, level + 1, max_depth, visited, remaining)?;
            nodes.push(ReferralNode {
                id: referral.id,
                username: referral.username,
                total_invested: referral.total_invested,
                joined_at: referral.created_at,
                level: level as u32,
                children,
            });
        }

        Ok(nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::{Account, AccountError};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::RwLock;

    #[derive(Default)]
    struct MockAccountRepository {
        accounts: RwLock<HashMap<String, Account>>,
    }

    impl MockAccountRepository {
        fn with_accounts(accounts: Vec<Account>) -> Arc<Self> {
            let repo = Self::default();
            {
                let mut map = repo.accounts.write().unwrap();
                for account in accounts {
                    map.insert(account.id.clone(), account);
                }
            }
            Arc::new(repo)
        }
    }

    impl AccountRepositoryTrait for MockAccountRepository {
        fn create(&self, _account: Account) -> crate::accounts::Result<Account> {
            unimplemented!()
        }

        fn get_by_id(&self, account_id: &str) -> crate::accounts::Result<Account> {
            self.accounts
                .read()
                .unwrap()
                .get(account_id)
                .cloned()
                .ok_or_else(|| AccountError::NotFound(account_id.to_string()))
        }

        fn find_by_referral_code(&self, _code: &str) -> crate::accounts::Result<Option<Account>> {
            unimplemented!()
        }

        fn list_by_sponsor(
            &self,
            sponsor_account_id: &str,
        ) -> crate::accounts::Result<Vec<Account>> {
            let mut referrals: Vec<Account> = self
                .accounts
                .read()
                .unwrap()
                .values()
                .filter(|a| a.sponsor_id.as_deref() == Some(sponsor_account_id))
                .cloned()
                .collect();
            referrals.sort_by(|a, b| a.id.cmp(&b.id));
            Ok(referrals)
        }

        fn credit_roi(
            &self,
            _account_id: &str,
            _amount: Decimal,
        ) -> crate::accounts::Result<Account> {
            unimplemented!()
        }

        fn credit_commission(
            &self,
            _account_id: &str,
            _amount: Decimal,
        ) -> crate::accounts::Result<Account> {
            unimplemented!()
        }

        fn add_invested(
            &self,
            _account_id: &str,
            _amount: Decimal,
        ) -> crate::accounts::Result<Account> {
            unimplemented!()
        }
    }

    fn account(id: &str, sponsor_id: Option<&str>, invested: Decimal) -> Account {
        let now = Utc::now().naive_utc();
        Account {
            id: id.to_string(),
            username: id.to_string(),
            email: format!("{}@example.com", id),
            referral_code: format!("{}-code", id),
            sponsor_id: sponsor_id.map(String::from),
            balance: Decimal::ZERO,
            total_invested: invested,
            total_roi: Decimal::ZERO,
            total_commission_earned: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn builds_two_level_downline_for_the_chain_scenario() {
        // T sponsors S, S sponsors U.
        let repo = MockAccountRepository::with_accounts(vec![
            account("T", None, dec!(0)),
            account("S", Some("T"), dec!(250)),
            account("U", Some("S"), dec!(1000)),
        ]);
        let service = ReferralService::new(repo);

        let tree = service.build_tree("T", 3).unwrap();

        assert_eq!(tree.len(), 1);
        let s = &tree[0];
        assert_eq!(s.id, "S");
        assert_eq!(s.level, 1);
        assert_eq!(s.total_invested, dec!(250));
        assert_eq!(s.children.len(), 1);

        let u = &s.children[0];
        assert_eq!(u.id, "U");
        assert_eq!(u.level, 2);
        assert!(u.children.is_empty());
    }

    #[test]
    fn depth_is_bounded_by_max_depth() {
        let repo = MockAccountRepository::with_accounts(vec![
            account("a", None, dec!(0)),
            account("b", Some("a"), dec!(0)),
            account("c", Some("b"), dec!(0)),
            account("d", Some("c"), dec!(0)),
            account("e", Some("d"), dec!(0)),
        ]);
        let service = ReferralService::new(repo);

        let tree = service.build_tree("a", 2).unwrap();

        let b = &tree[0];
        let c = &b.children[0];
        assert_eq!(c.level, 2);
        assert!(c.children.is_empty(), "level 3 must not be expanded");

        // Requests beyond the ceiling are clamped to MAX_REFERRAL_DEPTH.
        let tree = service.build_tree("a", 10).unwrap();
        let d = &tree[0].children[0].children[0];
        assert_eq!(d.level, 3);
        assert!(d.children.is_empty());
    }

    #[test]
    fn account_without_referrals_yields_an_empty_forest() {
        let repo = MockAccountRepository::with_accounts(vec![account("lonely", None, dec!(0))]);
        let service = ReferralService::new(repo);

        assert!(service.build_tree("lonely", 3).unwrap().is_empty());
    }

    #[test]
    fn visited_guard_terminates_on_a_corrupted_cycle() {
        // Not constructible through registration, but the traversal must
        // still terminate if the store is corrupted into a cycle.
        let repo = MockAccountRepository::with_accounts(vec![
            account("x", Some("y"), dec!(0)),
            account("y", Some("x"), dec!(0)),
        ]);
        let service = ReferralService::new(repo);

        let tree = service.build_tree("x", 3).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, "y");
        assert!(tree[0].children.is_empty());
    }
}

use async_trait::async_trait;
use chrono::{Duration, Utc};
use log::{error, info};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::accounts::AccountRepositoryTrait;
use crate::commissions::CommissionServiceTrait;
use crate::errors::Result;
use crate::plans::PlanCatalog;

use super::investments_errors::InvestmentError;
use super::investments_model::{Investment, InvestmentStatus, NewInvestment};
use super::investments_traits::{InvestmentRepositoryTrait, InvestmentServiceTrait};

/// Lifecycle manager for investments: validated creation against the plan
/// catalog, and the one-way active -> completed transition.
pub struct InvestmentService {
    investment_repository: Arc<dyn InvestmentRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
    commission_service: Arc<dyn CommissionServiceTrait>,
    plan_catalog: PlanCatalog,
}

impl InvestmentService {
    /// Creates a new InvestmentService instance
    pub fn new(
        investment_repository: Arc<dyn InvestmentRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
        commission_service: Arc<dyn CommissionServiceTrait>,
        plan_catalog: PlanCatalog,
    ) -> Self {
        Self {
            investment_repository,
            account_repository,
            commission_service,
            plan_catalog,
        }
    }
}

#[async_trait]
impl InvestmentServiceTrait for InvestmentService {
    async fn create_investment(&self, new_investment: NewInvestment) -> Result<Investment> {
        let plan = self
            .plan_catalog
            .get(&new_investment.plan_name)
            .ok_or_else(|| {
                InvestmentError::InvalidPlan(format!(
                    "Unknown plan '{}'",
                    new_investment.plan_name
                ))
            })?;

        if new_investment.amount <= Decimal::ZERO {
            return Err(
                InvestmentError::InvalidAmount("Amount must be positive".to_string()).into(),
            );
        }
        if new_investment.amount < plan.minimum_amount {
            return Err(InvestmentError::InvalidAmount(format!(
                "Amount {} is below the {} plan minimum of {}",
                new_investment.amount, plan.name, plan.minimum_amount
            ))
            .into());
        }

        let owner = self.account_repository.get_by_id(&new_investment.owner_id)?;

        let now = Utc::now().naive_utc();
        let investment = self.investment_repository.insert(Investment {
            id: Uuid::new_v4().to_string(),
            owner_id: owner.id.clone(),
            amount: new_investment.amount,
            plan_name: plan.name.clone(),
            daily_rate: plan.daily_rate,
            start_date: now,
            end_date: now + Duration::days(plan.duration_days),
            status: InvestmentStatus::Active,
            created_at: now,
            updated_at: now,
        })?;

        self.account_repository
            .add_invested(&owner.id, investment.amount)?;

        info!(
            "Created {} investment {} of {} for account {}",
            investment.plan_name, investment.id, investment.amount, owner.id
        );

        // Commission is best-effort relative to the investment record: a
        // distribution failure is logged and never rolls the investment back.
        if let Err(e) = self
            .commission_service
            .distribute(&owner.id, &investment.id, investment.amount)
            .await
        {
            error!(
                "Commission distribution failed for investment {}: {}",
                investment.id, e
            );
        }

        Ok(investment)
    }

    async fn expire_if_matured(&self, investment: &Investment) -> Result<bool> {
        if investment.status != InvestmentStatus::Active {
            return Ok(false);
        }
        if !investment.is_matured_at(Utc::now().naive_utc()) {
            return Ok(false);
        }

        let completed = self.investment_repository.mark_completed(&investment.id)?;
        if completed {
            info!("Investment {} matured and was completed", investment.id);
        }
        Ok(completed)
    }

    fn get_investment(&self, investment_id: &str) -> Result<Investment> {
        Ok(self.investment_repository.get_by_id(investment_id)?)
    }

    fn list_active(&self) -> Result<Vec<Investment>> {
        Ok(self.investment_repository.list_active()?)
    }

    fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Investment>> {
        Ok(self.investment_repository.list_by_owner(owner_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::{Account, AccountError};
    use crate::commissions::CommissionRecord;
    use crate::errors::Error;
    use crate::plans::Plan;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::RwLock;

    #[derive(Default)]
    struct MockInvestmentRepository {
        investments: RwLock<HashMap<String, Investment>>,
    }

    impl InvestmentRepositoryTrait for MockInvestmentRepository {
        fn insert(&self, investment: Investment) -> crate::investments::Result<Investment> {
            self.investments
                .write()
                .unwrap()
                .insert(investment.id.clone(), investment.clone());
            Ok(investment)
        }

        fn get_by_id(&self, investment_id: &str) -> crate::investments::Result<Investment> {
            self.investments
                .read()
                .unwrap()
                .get(investment_id)
                .cloned()
                .ok_or_else(|| InvestmentError::NotFound(investment_id.to_string()))
        }

        fn list_active(&self) -> crate::investments::Result<Vec<Investment>> {
            Ok(self
                .investments
                .read()
                .unwrap()
                .values()
                .filter(|i| i.status == InvestmentStatus::Active)
                .cloned()
                .collect())
        }

        fn list_by_owner(&self, owner_id: &str) -> crate::investments::Result<Vec<Investment>> {
            Ok(self
                .investments
                .read()
                .unwrap()
                .values()
                .filter(|i| i.owner_id == owner_id)
                .cloned()
                .collect())
        }

        fn mark_completed(&self, investment_id: &str) -> crate::investments::Result<bool> {
            let mut investments = self.investments.write().unwrap();
            match investments.get_mut(investment_id) {
                Some(investment) if investment.status == InvestmentStatus::Active => {
                    investment.status = InvestmentStatus::Completed;
                    Ok(true)
                }
                _ => Ok(false),
            }
        }
    }

    #[derive(Default)]
    struct MockAccountRepository {
        accounts: RwLock<HashMap<String, Account>>,
    }

    impl MockAccountRepository {
        fn with_account(account_id: &str) -> Arc<Self> {
            let repo = Self::default();
            let now = Utc::now().naive_utc();
            repo.accounts.write().unwrap().insert(
                account_id.to_string(),
                Account {
                    id: account_id.to_string(),
                    username: account_id.to_string(),
                    email: format!("{}@example.com", account_id),
                    referral_code: format!("{}-code", account_id),
                    sponsor_id: None,
                    balance: Decimal::ZERO,
                    total_invested: Decimal::ZERO,
                    total_roi: Decimal::ZERO,
                    total_commission_earned: Decimal::ZERO,
                    created_at: now,
                    updated_at: now,
                },
            );
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
            _sponsor_account_id: &str,
        ) -> crate::accounts::Result<Vec<Account>> {
            unimplemented!()
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
            account_id: &str,
            amount: Decimal,
        ) -> crate::accounts::Result<Account> {
            let mut accounts = self.accounts.write().unwrap();
            let account = accounts
                .get_mut(account_id)
                .ok_or_else(|| AccountError::NotFound(account_id.to_string()))?;
            account.total_invested += amount;
            Ok(account.clone())
        }
    }

    #[derive(Default)]
    struct MockCommissionService {
        calls: RwLock<Vec<(String, String, Decimal)>>,
        fail: bool,
    }

    #[async_trait]
    impl CommissionServiceTrait for MockCommissionService {
        async fn distribute(
            &self,
            source_account_id: &str,
            investment_id: &str,
            amount: Decimal,
        ) -> Result<Vec<CommissionRecord>> {
            self.calls.write().unwrap().push((
                source_account_id.to_string(),
                investment_id.to_string(),
                amount,
            ));
            if self.fail {
                return Err(Error::Unexpected("distribution blew up".to_string()));
            }
            Ok(Vec::new())
        }
    }

    fn service_with(
        investments: Arc<MockInvestmentRepository>,
        accounts: Arc<MockAccountRepository>,
        commissions: Arc<MockCommissionService>,
        catalog: PlanCatalog,
    ) -> InvestmentService {
        InvestmentService::new(investments, accounts, commissions, catalog)
    }

    fn new_investment(amount: Decimal, plan_name: &str) -> NewInvestment {
        NewInvestment {
            owner_id: "owner".to_string(),
            amount,
            plan_name: plan_name.to_string(),
        }
    }

    #[test]
    fn creation_snapshots_the_plan_rate_and_duration() {
        let investments = Arc::new(MockInvestmentRepository::default());
        let accounts = MockAccountRepository::with_account("owner");
        let commissions = Arc::new(MockCommissionService::default());
        let service = service_with(
            investments,
            accounts.clone(),
            commissions.clone(),
            PlanCatalog::default(),
        );

        let investment = tokio_test::block_on(
            service.create_investment(new_investment(dec!(1000), "basic")),
        )
        .unwrap();

        assert_eq!(investment.plan_name, "Basic");
        assert_eq!(investment.daily_rate, dec!(1.0));
        assert_eq!(investment.status, InvestmentStatus::Active);
        assert_eq!(
            investment.end_date,
            investment.start_date + Duration::days(30)
        );

        // Owner's lifetime invested total is bumped.
        let owner = accounts.get_by_id("owner").unwrap();
        assert_eq!(owner.total_invested, dec!(1000));

        // Commission distribution was invoked exactly once with the
        // investment's coordinates.
        let calls = commissions.calls.read().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "owner");
        assert_eq!(calls[0].1, investment.id);
        assert_eq!(calls[0].2, dec!(1000));
    }

    #[test]
    fn later_catalog_changes_never_affect_existing_positions() {
        let investments = Arc::new(MockInvestmentRepository::default());
        let accounts = MockAccountRepository::with_account("owner");
        let service = service_with(
            investments.clone(),
            accounts.clone(),
            Arc::new(MockCommissionService::default()),
            PlanCatalog::default(),
        );

        let created = tokio_test::block_on(
            service.create_investment(new_investment(dec!(1000), "Basic")),
        )
        .unwrap();

        // Rebuild the service around a catalog where Basic pays double.
        let changed = PlanCatalog::new(vec![Plan {
            name: "Basic".to_string(),
            daily_rate: dec!(2.0),
            duration_days: 15,
            minimum_amount: dec!(100),
        }]);
        let service = service_with(
            investments,
            accounts,
            Arc::new(MockCommissionService::default()),
            changed,
        );

        let stored = service.get_investment(&created.id).unwrap();
        assert_eq!(stored.daily_rate, dec!(1.0));
        assert_eq!(stored.end_date, stored.start_date + Duration::days(30));
    }

    #[test]
    fn unknown_plan_is_rejected() {
        let service = service_with(
            Arc::new(MockInvestmentRepository::default()),
            MockAccountRepository::with_account("owner"),
            Arc::new(MockCommissionService::default()),
            PlanCatalog::default(),
        );

        let result = tokio_test::block_on(
            service.create_investment(new_investment(dec!(1000), "Platinum")),
        );
        assert!(matches!(
            result,
            Err(Error::Investment(InvestmentError::InvalidPlan(_)))
        ));
    }

    #[test]
    fn non_positive_or_below_minimum_amounts_are_rejected() {
        let service = service_with(
            Arc::new(MockInvestmentRepository::default()),
            MockAccountRepository::with_account("owner"),
            Arc::new(MockCommissionService::default()),
            PlanCatalog::default(),
        );

        for amount in [dec!(0), dec!(-5), dec!(50)] {
            let result =
                tokio_test::block_on(service.create_investment(new_investment(amount, "Basic")));
            assert!(
                matches!(
                    result,
                    Err(Error::Investment(InvestmentError::InvalidAmount(_)))
                ),
                "amount {} should be rejected",
                amount
            );
        }
    }

    #[test]
    fn commission_failure_does_not_fail_the_investment() {
        let investments = Arc::new(MockInvestmentRepository::default());
        let commissions = Arc::new(MockCommissionService {
            fail: true,
            ..Default::default()
        });
        let service = service_with(
            investments.clone(),
            MockAccountRepository::with_account("owner"),
            commissions,
            PlanCatalog::default(),
        );

        let investment = tokio_test::block_on(
            service.create_investment(new_investment(dec!(1000), "Basic")),
        )
        .unwrap();

        // The investment persisted despite the distribution error.
        assert!(investments
            .investments
            .read()
            .unwrap()
            .contains_key(&investment.id));
    }

    #[test]
    fn missing_owner_rejects_the_investment() {
        let service = service_with(
            Arc::new(MockInvestmentRepository::default()),
            Arc::new(MockAccountRepository::default()),
            Arc::new(MockCommissionService::default()),
            PlanCatalog::default(),
        );

        let result = tokio_test::block_on(
            service.create_investment(new_investment(dec!(1000), "Basic")),
        );
        assert!(matches!(
            result,
            Err(Error::Account(AccountError::NotFound(_)))
        ));
    }

    #[test]
    fn expire_if_matured_completes_past_term_investments_once() {
        let investments = Arc::new(MockInvestmentRepository::default());
        let service = service_with(
            investments.clone(),
            MockAccountRepository::with_account("owner"),
            Arc::new(MockCommissionService::default()),
            PlanCatalog::default(),
        );

        let now = Utc::now().naive_utc();
        let matured = Investment {
            id: "inv-1".to_string(),
            owner_id: "owner".to_string(),
            amount: dec!(1000),
            plan_name: "Basic".to_string(),
            daily_rate: dec!(1.0),
            start_date: now - Duration::days(31),
            end_date: now - Duration::days(1),
            status: InvestmentStatus::Active,
            created_at: now - Duration::days(31),
            updated_at: now - Duration::days(31),
        };
        investments.insert(matured.clone()).unwrap();

        assert!(tokio_test::block_on(service.expire_if_matured(&matured)).unwrap());
        assert_eq!(
            investments.get_by_id("inv-1").unwrap().status,
            InvestmentStatus::Completed
        );

        // Second call observes the completed row and is a no-op.
        let completed = investments.get_by_id("inv-1").unwrap();
        assert!(!tokio_test::block_on(service.expire_if_matured(&completed)).unwrap());
    }

    #[test]
    fn expire_if_matured_leaves_running_investments_alone() {
        let investments = Arc::new(MockInvestmentRepository::default());
        let service = service_with(
            investments.clone(),
            MockAccountRepository::with_account("owner"),
            Arc::new(MockCommissionService::default()),
            PlanCatalog::default(),
        );

        let now = Utc::now().naive_utc();
        let running = Investment {
            id: "inv-2".to_string(),
            owner_id: "owner".to_string(),
            amount: dec!(500),
            plan_name: "Basic".to_string(),
            daily_rate: dec!(1.0),
            start_date: now,
            end_date: now + Duration::days(30),
            status: InvestmentStatus::Active,
            created_at: now,
            updated_at: now,
        };
        investments.insert(running.clone()).unwrap();

        assert!(!tokio_test::block_on(service.expire_if_matured(&running)).unwrap());
        assert_eq!(
            investments.get_by_id("inv-2").unwrap().status,
            InvestmentStatus::Active
        );
    }
}

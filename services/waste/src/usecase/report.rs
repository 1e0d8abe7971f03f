use std::collections::HashMap;

use pilah_domain::category::{ALL_CATEGORIES, WasteCategory};

use crate::domain::repository::{ClassificationRepository, SubmissionRepository, UserRepository};
use crate::domain::types::{ClassifiedImage, Submission, User};
use crate::error::WasteServiceError;

// Admin-only read models. Role checks live in the handlers; these use cases
// only aggregate.

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardReport {
    pub user_count: u64,
    pub submission_count: u64,
    pub latest_submissions: Vec<Submission>,
}

const DASHBOARD_LATEST_LIMIT: u64 = 10;

pub struct AdminDashboardUseCase<U, S> {
    pub users: U,
    pub submissions: S,
}

impl<U, S> AdminDashboardUseCase<U, S>
where
    U: UserRepository,
    S: SubmissionRepository,
{
    pub async fn execute(&self) -> Result<DashboardReport, WasteServiceError> {
        let user_count = self.users.count().await?;
        let submission_count = self.submissions.count().await?;
        let latest_submissions = self.submissions.latest(DASHBOARD_LATEST_LIMIT).await?;
        Ok(DashboardReport {
            user_count,
            submission_count,
            latest_submissions,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserWithActivity {
    pub user: User,
    pub submission_count: u64,
}

pub struct ListUsersUseCase<U, S> {
    pub users: U,
    pub submissions: S,
}

impl<U, S> ListUsersUseCase<U, S>
where
    U: UserRepository,
    S: SubmissionRepository,
{
    pub async fn execute(&self) -> Result<Vec<UserWithActivity>, WasteServiceError> {
        let users = self.users.list().await?;
        let counts: HashMap<_, _> = self.submissions.count_by_user().await?.into_iter().collect();
        Ok(users
            .into_iter()
            .map(|user| {
                let submission_count = counts.get(&user.id).copied().unwrap_or(0);
                UserWithActivity {
                    user,
                    submission_count,
                }
            })
            .collect())
    }
}

/// Completed classifications grouped per category, in report order. Every
/// category appears even when empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryReport {
    pub groups: Vec<(WasteCategory, Vec<ClassifiedImage>)>,
}

pub struct CategoryReportUseCase<C> {
    pub classifications: C,
}

impl<C: ClassificationRepository> CategoryReportUseCase<C> {
    pub async fn execute(&self) -> Result<CategoryReport, WasteServiceError> {
        let rows = self.classifications.list_completed().await?;
        let mut by_category: HashMap<WasteCategory, Vec<ClassifiedImage>> = HashMap::new();
        for row in rows {
            by_category
                .entry(row.classification.result)
                .or_default()
                .push(row);
        }
        let groups = ALL_CATEGORIES
            .into_iter()
            .map(|category| (category, by_category.remove(&category).unwrap_or_default()))
            .collect();
        Ok(CategoryReport { groups })
    }
}

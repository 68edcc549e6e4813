//! Application services: the single-writer task store, the sync reconciler
//! that bridges backend results into it, and the session that ties both to
//! the signed-in user.

mod reconciler;
mod session;
mod store;
mod subscription;

pub use reconciler::{CreateTaskRequest, TaskSyncError, TaskSyncResult, TaskSyncService};
pub use session::{TaskSession, TaskSessionError, TaskSessionResult};
pub use store::TaskStore;
pub use subscription::SubscriptionHandle;

pub mod add;
pub mod browse;
pub mod commit;
pub mod context;
pub mod init;
pub mod ls;
pub mod remove;
pub mod rename;
pub mod restore;

pub use add::*;
pub use browse::*;
pub use commit::*;
pub use init::*;
pub use ls::*;
pub use remove::*;
pub use rename::*;
pub use restore::*;

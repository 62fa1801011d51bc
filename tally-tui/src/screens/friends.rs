use tally_core::Friend;

use crate::presenter::{RowAction, RowDescriptor};

pub fn describe(friend: &Friend) -> RowDescriptor {
    RowDescriptor {
        title: friend.name.clone(),
        subtitle: format!("@{}", friend.handle),
        accessory: friend.is_premium.then(|| "★ premium".to_string()),
        selectable: true,
        action: RowAction::OpenFriendDetail(friend.friend_id.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_test_utils::fixtures;

    #[test]
    fn test_ada_row() {
        let row = describe(&fixtures::ada());
        assert_eq!(row.title, "Ada");
        assert_eq!(row.subtitle, "@ada");
        assert!(row.selectable);
        assert_eq!(row.action, RowAction::OpenFriendDetail("f1".into()));
    }
}

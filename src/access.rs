//! Access resolution
//!
//! Maps role identifiers, in whichever form a caller holds them, to the
//! canonical role table and answers authorization questions. Identifiers
//! arrive from an upstream identity service that is only partially trusted:
//! an unrecognized identifier is logged and resolved to the lowest-privilege
//! role rather than failing, so the rest of the system stays renderable.

use rustc_hash::FxHashMap;
use tracing::warn;
use uuid::Uuid;

use crate::roles::{BadgeColor, Permission, ROLES, Role, RoleCode};

/// Resolves role identifiers and answers authorization checks against the
/// static role table.
///
/// Accepted input forms: the UUID string assigned by the upstream API (hex
/// case does not matter) and the short code (`"ADMIN"`, `"CAJERO"`, ...;
/// normalized to uppercase at the boundary). Both forms of the same logical
/// role resolve to the identical [`Role`].
#[derive(Debug)]
pub struct AccessResolver {
    by_uuid: FxHashMap<Uuid, &'static Role>,
    by_code: FxHashMap<&'static str, &'static Role>,
}

impl Default for AccessResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessResolver {
    /// Build a resolver over the static role table.
    pub fn new() -> Self {
        let mut by_uuid = FxHashMap::default();
        let mut by_code = FxHashMap::default();

        for role in ROLES {
            by_uuid.insert(role.uuid(), role);
            by_code.insert(role.code().as_str(), role);
        }

        Self { by_uuid, by_code }
    }

    /// Resolve an identifier to its canonical role, if it names one.
    pub fn try_resolve(&self, identifier: &str) -> Option<&'static Role> {
        let identifier = identifier.trim();

        if let Ok(uuid) = Uuid::parse_str(identifier) {
            return self.by_uuid.get(&uuid).copied();
        }

        self.by_code
            .get(identifier.to_ascii_uppercase().as_str())
            .copied()
    }

    /// Resolve an identifier to its canonical role.
    ///
    /// Unrecognized identifiers resolve to the lowest-privilege fallback role
    /// and are logged; a corrupt role value from upstream must never take the
    /// presentation layer down.
    pub fn resolve(&self, identifier: &str) -> &'static Role {
        self.try_resolve(identifier).unwrap_or_else(|| {
            warn!(identifier, "unknown role identifier, falling back to Usuario");
            Role::fallback()
        })
    }

    /// Whether the given role is one of the allowed roles.
    ///
    /// Matching is by canonical role, exact only: a higher-priority role does
    /// not satisfy a check for a lower-priority one unless explicitly listed.
    /// Unrecognized entries in `allowed` never match.
    pub fn is_allowed(&self, identifier: &str, allowed: &[&str]) -> bool {
        let actor = self.resolve(identifier).code();

        allowed.iter().any(|candidate| {
            self.try_resolve(candidate)
                .is_some_and(|role| role.code() == actor)
        })
    }

    /// Whether the given role grants the given permission.
    pub fn has_permission(&self, identifier: &str, permission: Permission) -> bool {
        self.resolve(identifier).has_permission(permission)
    }

    /// Whether the acting role may create, edit or delete users holding the
    /// target role.
    pub fn can_manage(&self, acting: &str, target: &str) -> bool {
        let target = self.resolve(target).code();
        self.resolve(acting).manages(target)
    }

    /// Display name for the given role.
    pub fn display_name(&self, identifier: &str) -> &'static str {
        self.resolve(identifier).label()
    }

    /// Badge color for the given role.
    pub fn badge_color(&self, identifier: &str) -> BadgeColor {
        self.resolve(identifier).badge_color()
    }

    /// Description for the given role.
    pub fn description(&self, identifier: &str) -> &'static str {
        self.resolve(identifier).description()
    }

    /// Whether `first` ranks strictly above `second`.
    pub fn is_higher_priority(&self, first: &str, second: &str) -> bool {
        self.resolve(first).priority() > self.resolve(second).priority()
    }

    /// All roles, highest priority first. Ties (not expected, priorities are
    /// distinct) break deterministically on the role code.
    pub fn sorted_roles(&self) -> Vec<&'static Role> {
        let mut roles: Vec<_> = ROLES.to_vec();
        Self::sort(&mut roles);
        roles
    }

    /// Roles the acting role may assign when creating or editing a user: its
    /// manageable roles plus its own, except that an owner may not mint
    /// another owner. Sorted highest priority first.
    pub fn selectable_roles(&self, acting: &str) -> Vec<&'static Role> {
        let actor = self.resolve(acting);

        let mut roles: Vec<&'static Role> = actor
            .can_manage()
            .iter()
            .filter_map(|code| self.by_code.get(code.as_str()).copied())
            .collect();

        if actor.code() != RoleCode::Propietario && !roles.iter().any(|r| r.code() == actor.code())
        {
            roles.push(actor);
        }

        Self::sort(&mut roles);
        roles
    }

    fn sort(roles: &mut [&'static Role]) {
        roles.sort_by(|a, b| {
            b.priority()
                .cmp(&a.priority())
                .then_with(|| a.code().as_str().cmp(b.code().as_str()))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADMIN_UUID: &str = "f47ac10b-58cc-4372-a567-0e02b2c3d479";

    fn resolver() -> AccessResolver {
        AccessResolver::new()
    }

    #[test]
    fn uuid_and_code_forms_resolve_to_the_same_role() {
        let resolver = resolver();

        let by_uuid = resolver.resolve(ADMIN_UUID);
        let by_code = resolver.resolve("ADMIN");

        assert_eq!(by_uuid, by_code);
        assert!(
            std::ptr::eq(by_uuid, by_code),
            "both forms must yield the identical canonical role"
        );
    }

    #[test]
    fn identifier_comparison_is_case_insensitive_at_the_boundary() {
        let resolver = resolver();

        assert_eq!(resolver.resolve("cajero").code(), RoleCode::Cajero);
        assert_eq!(resolver.resolve("  Admin  ").code(), RoleCode::Admin);
        assert_eq!(
            resolver
                .resolve("F47AC10B-58CC-4372-A567-0E02B2C3D479")
                .code(),
            RoleCode::Admin
        );
    }

    #[test]
    fn unknown_identifier_falls_back_to_usuario() {
        let resolver = resolver();

        let role = resolver.resolve("not-a-role");

        assert_eq!(role.code(), RoleCode::User);
        assert_eq!(role.label(), "Usuario");
        assert_eq!(resolver.try_resolve("not-a-role"), None);
    }

    #[test]
    fn unknown_uuid_falls_back_to_usuario() {
        let resolver = resolver();

        let role = resolver.resolve("00000000-0000-0000-0000-000000000000");

        assert_eq!(role.code(), RoleCode::User);
    }

    #[test]
    fn is_allowed_requires_exact_membership() {
        let resolver = resolver();

        assert!(resolver.is_allowed("CAJERO", &["CAJERO", "ALMACENISTA"]));
        assert!(resolver.is_allowed(ADMIN_UUID, &["ADMIN"]));

        // Higher-priority roles are not implicitly allowed.
        assert!(!resolver.is_allowed("ADMIN", &["CAJERO"]));
        assert!(!resolver.is_allowed("PROPIETARIO", &["CAJERO", "ALMACENISTA"]));
    }

    #[test]
    fn is_allowed_mixes_identifier_forms() {
        let resolver = resolver();

        assert!(resolver.is_allowed(ADMIN_UUID, &["admin"]));
        assert!(resolver.is_allowed("ADMIN", &[ADMIN_UUID]));
    }

    #[test]
    fn is_allowed_ignores_unknown_entries() {
        let resolver = resolver();

        assert!(!resolver.is_allowed("USER", &["GARBAGE"]));
        assert!(resolver.is_allowed("USER", &["GARBAGE", "USER"]));
    }

    #[test]
    fn unknown_actor_is_allowed_only_where_usuario_is() {
        let resolver = resolver();

        assert!(resolver.is_allowed("corrupt-value", &["USER"]));
        assert!(!resolver.is_allowed("corrupt-value", &["ADMIN"]));
    }

    #[test]
    fn can_manage_follows_the_management_scope() {
        let resolver = resolver();

        assert!(resolver.can_manage("PROPIETARIO", "CAJERO"));
        assert!(!resolver.can_manage("PROPIETARIO", "PROPIETARIO"));
        assert!(resolver.can_manage("ADMIN", "ADMIN"));
        assert!(!resolver.can_manage("CAJERO", "USER"));
    }

    #[test]
    fn permission_checks_resolve_identifiers_first() {
        let resolver = resolver();

        assert!(resolver.has_permission("PROPIETARIO", Permission::Finances));
        assert!(!resolver.has_permission(ADMIN_UUID, Permission::Finances));
        assert!(resolver.has_permission("nonsense", Permission::Dashboard));
        assert!(!resolver.has_permission("nonsense", Permission::Users));
    }

    #[test]
    fn display_lookups_share_the_fallback() {
        let resolver = resolver();

        assert_eq!(resolver.display_name("ALMACENISTA"), "Almacenista");
        assert_eq!(resolver.badge_color("CAJERO"), BadgeColor::Success);
        assert_eq!(resolver.display_name("garbage"), "Usuario");
        assert_eq!(resolver.badge_color("garbage"), BadgeColor::Secondary);
        assert_eq!(resolver.description("garbage"), "Acceso básico al sistema.");
    }

    #[test]
    fn sorted_roles_descend_by_priority() {
        let resolver = resolver();

        let codes: Vec<_> = resolver
            .sorted_roles()
            .into_iter()
            .map(Role::code)
            .collect();

        assert_eq!(
            codes,
            vec![
                RoleCode::Admin,
                RoleCode::Propietario,
                RoleCode::Almacenista,
                RoleCode::Cajero,
                RoleCode::User,
            ]
        );
    }

    #[test]
    fn selectable_roles_include_own_role_except_for_propietario() {
        let resolver = resolver();

        let admin: Vec<_> = resolver
            .selectable_roles("ADMIN")
            .into_iter()
            .map(Role::code)
            .collect();
        assert_eq!(
            admin,
            vec![
                RoleCode::Admin,
                RoleCode::Almacenista,
                RoleCode::Cajero,
                RoleCode::User,
            ]
        );

        let owner: Vec<_> = resolver
            .selectable_roles("PROPIETARIO")
            .into_iter()
            .map(Role::code)
            .collect();
        assert_eq!(
            owner,
            vec![RoleCode::Almacenista, RoleCode::Cajero, RoleCode::User]
        );
        assert!(!owner.contains(&RoleCode::Propietario));
    }

    #[test]
    fn is_higher_priority_compares_resolved_roles() {
        let resolver = resolver();

        assert!(resolver.is_higher_priority("ADMIN", "PROPIETARIO"));
        assert!(!resolver.is_higher_priority("CAJERO", "ALMACENISTA"));
        assert!(!resolver.is_higher_priority("USER", "USER"));
    }
}

//! Roles
//!
//! The static role table. Roles are configured upstream and fixed for the
//! lifetime of the process; each carries the canonical pair of identifiers
//! callers use interchangeably (the API's UUID and the short uppercase code),
//! plus display metadata, granted permissions and management scope.

use std::fmt;

use uuid::{Uuid, uuid};

/// Canonical role identifier.
///
/// Every accepted input form (UUID string, short code) resolves to exactly
/// one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleCode {
    /// Administrator.
    Admin,
    /// Business owner.
    Propietario,
    /// Warehouse keeper.
    Almacenista,
    /// Cashier.
    Cajero,
    /// Basic user; also the fallback for unrecognized identifiers.
    User,
}

impl RoleCode {
    /// The short uppercase code, as sent by external callers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Propietario => "PROPIETARIO",
            Self::Almacenista => "ALMACENISTA",
            Self::Cajero => "CAJERO",
            Self::User => "USER",
        }
    }
}

impl fmt::Display for RoleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One grantable capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// View the dashboard.
    Dashboard,
    /// Manage products.
    Products,
    /// Manage orders.
    Orders,
    /// Manage customers.
    Customers,
    /// View transactions.
    Transactions,
    /// Financial settings and reports.
    Finances,
    /// Statistics and analytics.
    Statistics,
    /// Manage user accounts.
    Users,
    /// System settings.
    Settings,
    /// Public catalog management.
    Catalog,
    /// Warehouse management.
    Warehouse,
}

impl Permission {
    /// The permission token as persisted and displayed.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Products => "productos",
            Self::Orders => "pedidos",
            Self::Customers => "clientes",
            Self::Transactions => "transacciones",
            Self::Finances => "finanzas",
            Self::Statistics => "estadisticas",
            Self::Users => "usuarios",
            Self::Settings => "configuraciones",
            Self::Catalog => "catalogo",
            Self::Warehouse => "almacen",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic badge color for UI presentation. Not behaviorally significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    /// Red badge.
    Danger,
    /// Blue badge.
    Primary,
    /// Yellow badge.
    Warning,
    /// Green badge.
    Success,
    /// Gray badge.
    Secondary,
}

impl BadgeColor {
    /// The semantic color tag as a string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Danger => "danger",
            Self::Primary => "primary",
            Self::Warning => "warning",
            Self::Success => "success",
            Self::Secondary => "secondary",
        }
    }
}

/// A named bundle of permissions and management scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    code: RoleCode,
    uuid: Uuid,
    label: &'static str,
    description: &'static str,
    badge: BadgeColor,
    permissions: &'static [Permission],
    can_manage: &'static [RoleCode],
    priority: u8,
}

static ADMIN: Role = Role {
    code: RoleCode::Admin,
    uuid: uuid!("f47ac10b-58cc-4372-a567-0e02b2c3d479"),
    label: "Administrador",
    description: "Acceso a la mayoría de funciones administrativas, excepto configuraciones financieras sensibles.",
    badge: BadgeColor::Primary,
    permissions: &[
        Permission::Dashboard,
        Permission::Products,
        Permission::Orders,
        Permission::Customers,
        Permission::Transactions,
        Permission::Statistics,
        Permission::Users,
        Permission::Settings,
        Permission::Catalog,
        Permission::Warehouse,
    ],
    can_manage: &[
        RoleCode::Admin,
        RoleCode::Almacenista,
        RoleCode::Cajero,
        RoleCode::User,
    ],
    priority: 5,
};

static PROPIETARIO: Role = Role {
    code: RoleCode::Propietario,
    uuid: uuid!("7c9e6679-7425-40de-944b-e07fc1f907cb"),
    label: "Propietario",
    description: "Acceso completo al sistema, incluyendo configuraciones financieras y reportes avanzados.",
    badge: BadgeColor::Danger,
    permissions: &[
        Permission::Dashboard,
        Permission::Products,
        Permission::Orders,
        Permission::Customers,
        Permission::Transactions,
        Permission::Finances,
        Permission::Statistics,
        Permission::Catalog,
        Permission::Warehouse,
    ],
    can_manage: &[RoleCode::Almacenista, RoleCode::Cajero, RoleCode::User],
    priority: 4,
};

static ALMACENISTA: Role = Role {
    code: RoleCode::Almacenista,
    uuid: uuid!("7c9e6679-7425-40de-944b-e07fc1f907ca"),
    label: "Almacenista",
    description: "Acceso a gestión de productos, inventario y almacén.",
    badge: BadgeColor::Warning,
    permissions: &[
        Permission::Dashboard,
        Permission::Products,
        Permission::Orders,
        Permission::Warehouse,
        Permission::Customers,
    ],
    can_manage: &[],
    priority: 3,
};

static CAJERO: Role = Role {
    code: RoleCode::Cajero,
    uuid: uuid!("7c9e6679-7425-40de-944b-e07fc1f907c9"),
    label: "Cajero",
    description: "Acceso limitado a ventas, pedidos y clientes.",
    badge: BadgeColor::Success,
    permissions: &[Permission::Dashboard, Permission::Orders, Permission::Customers],
    can_manage: &[],
    priority: 2,
};

static USUARIO: Role = Role {
    code: RoleCode::User,
    uuid: uuid!("7c9e6679-7425-40de-944b-e07fc1f90ae7"),
    label: "Usuario",
    description: "Acceso básico al sistema.",
    badge: BadgeColor::Secondary,
    permissions: &[Permission::Dashboard],
    can_manage: &[],
    priority: 1,
};

/// All roles, in no particular order.
pub static ROLES: [&Role; 5] = [&ADMIN, &PROPIETARIO, &ALMACENISTA, &CAJERO, &USUARIO];

impl Role {
    /// The lowest-privilege role, substituted for unrecognized identifiers.
    pub fn fallback() -> &'static Role {
        &USUARIO
    }

    /// Canonical role code.
    pub fn code(&self) -> RoleCode {
        self.code
    }

    /// The UUID form of the identifier, as used by the upstream API.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Human-readable display name.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Human-readable description.
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Badge color tag for UI presentation.
    pub fn badge_color(&self) -> BadgeColor {
        self.badge
    }

    /// Permissions granted to this role.
    pub fn permissions(&self) -> &'static [Permission] {
        self.permissions
    }

    /// Roles this role is authorized to create, edit and delete.
    pub fn can_manage(&self) -> &'static [RoleCode] {
        self.can_manage
    }

    /// Sort priority; higher means more privileged.
    pub fn priority(&self) -> u8 {
        self.priority
    }

    /// Whether this role grants the given permission.
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Whether this role may manage the given role.
    pub fn manages(&self, target: RoleCode) -> bool {
        self.can_manage.contains(&target)
    }
}

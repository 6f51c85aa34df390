// src/seed.rs
//! Hard-coded mock data sets.
//!
//! Every view calls its own function at mount time and keeps the returned
//! copy for itself. Nothing here is shared between views.

use crate::models::*;

fn s(value: &str) -> String {
    value.to_string()
}

pub const HOME_MUNICIPALITY: &str = "Δήμος Αθηναίων";

// ==================== EMPLOYEE ====================

pub fn my_resources() -> Vec<Resource> {
    let rows = [
        ("1", "Εκσκαφέας Κοματσού", "Μηχανήματα", 2, "Τεμάχια", ResourceStatus::Available),
        ("2", "Φορτηγό Mercedes", "Οχήματα", 5, "Τεμάχια", ResourceStatus::InUse),
        ("3", "Αντλία Νερού", "Εξοπλισμός", 10, "Τεμάχια", ResourceStatus::Available),
        ("4", "Τσιμέντο", "Υλικά Κατασκευών", 500, "Κιλά", ResourceStatus::Available),
        ("5", "Γεννήτρια 50KW", "Μηχανήματα", 3, "Τεμάχια", ResourceStatus::Lent),
    ];

    rows.iter()
        .map(|(id, name, category, quantity, unit, status)| Resource {
            id: s(id),
            name: s(name),
            category: s(category),
            quantity: *quantity,
            unit: s(unit),
            status: *status,
            municipality: s(HOME_MUNICIPALITY),
        })
        .collect()
}

pub fn other_municipality_resources() -> Vec<OtherMunicipalityResource> {
    let rows = [
        ("1", "Γερανός 20 Τόνων", "Μηχανήματα", 1, "Τεμάχια", "Δήμος Πειραιά", "8 km"),
        ("2", "Ασφαλτόστρωση", "Υλικά Κατασκευών", 2000, "Κιλά", "Δήμος Καλλιθέας", "5 km"),
        ("3", "Αντλία Λυμάτων", "Εξοπλισμός", 3, "Τεμάχια", "Δήμος Περιστερίου", "12 km"),
        ("4", "Φορτηγό Iveco", "Οχήματα", 2, "Τεμάχια", "Δήμος Αμαρουσίου", "15 km"),
        ("5", "Χωματουργικά Εργαλεία", "Εργαλεία", 50, "Τεμάχια", "Δήμος Γλυφάδας", "18 km"),
        ("6", "Ηλεκτρογεννήτρια 100KW", "Μηχανήματα", 1, "Τεμάχια", "Δήμος Χαλανδρίου", "10 km"),
        ("7", "Γερανός 15 Τόνων", "Μηχανήματα", 1, "Τεμάχια", "Δήμος Καλλιθέας", "5 km"),
        ("8", "Φορτηγό με Γερανό", "Οχήματα", 3, "Τεμάχια", "Δήμος Χαλανδρίου", "10 km"),
    ];

    rows.iter()
        .map(|(id, name, category, quantity, unit, municipality, distance)| OtherMunicipalityResource {
            id: s(id),
            name: s(name),
            category: s(category),
            quantity: *quantity,
            unit: s(unit),
            municipality: s(municipality),
            distance: s(distance),
        })
        .collect()
}

pub fn incoming_requests() -> Vec<IncomingRequest> {
    vec![
        IncomingRequest {
            id: s("1"),
            resource_name: s("Εκσκαφέας Κοματσού"),
            category: s("Μηχανήματα"),
            requested_by: s("Γιώργος Παπαδόπουλος"),
            from_municipality: s("Δήμος Πειραιά"),
            quantity: 1,
            unit: s("Τεμάχια"),
            justification: s("Απαιτείται για εργασίες ανακατασκευής οδού στην περιοχή Καλλιθέας. Το έργο έχει προθεσμία 2 εβδομάδων."),
            date: s("2025-12-08"),
            status: RequestStatus::Pending,
        },
        IncomingRequest {
            id: s("2"),
            resource_name: s("Αντλία Νερού"),
            category: s("Εξοπλισμός"),
            requested_by: s("Μαρία Κωνσταντίνου"),
            from_municipality: s("Δήμος Χαλανδρίου"),
            quantity: 2,
            unit: s("Τεμάχια"),
            justification: s("Χρειάζεται για άντληση νερού από πλημμυρισμένη περιοχή. Επείγουσα ανάγκη."),
            date: s("2025-12-09"),
            status: RequestStatus::Pending,
        },
        IncomingRequest {
            id: s("3"),
            resource_name: s("Φορτηγό Mercedes"),
            category: s("Οχήματα"),
            requested_by: s("Νίκος Αλεξόπουλος"),
            from_municipality: s("Δήμος Γλυφάδας"),
            quantity: 1,
            unit: s("Τεμάχια"),
            justification: s("Μεταφορά υλικών για έργα συντήρησης δημοτικών κτιρίων."),
            date: s("2025-12-07"),
            status: RequestStatus::Pending,
        },
    ]
}

fn resources_by_category() -> Vec<CategoryCount> {
    [
        ("Μηχανήματα", 45),
        ("Οχήματα", 68),
        ("Εξοπλισμός", 87),
        ("Εργαλεία", 32),
        ("Υλικά Κατασκευών", 13),
    ]
    .iter()
    .map(|(category, count)| CategoryCount { category: s(category), count: *count })
    .collect()
}

pub fn report_data() -> ReportData {
    ReportData {
        total_resources: 245,
        active_loans: 8,
        pending_requests: 12,
        completed_transactions: 156,
        resources_by_category: resources_by_category(),
    }
}

// ==================== CITIZEN ====================

pub fn citizen_stats() -> StatData {
    StatData {
        total_resources: 245,
        in_use: 58,
        available: 187,
        resources_by_category: resources_by_category(),
    }
}

pub fn recent_transactions() -> Vec<Transaction> {
    let rows = [
        ("1", "Δανεισμός Εκσκαφέα", "Προς Δήμο Πειραιά", "2025-12-09"),
        ("2", "Λήψη Αντλίας Νερού", "Από Δήμο Καλλιθέας", "2025-12-08"),
        ("3", "Καταγραφή Νέου Οχήματος", "Δήμος Αθηναίων", "2025-12-07"),
        ("4", "Επιστροφή Γερανού", "Προς Δήμο Χαλανδρίου", "2025-12-06"),
        ("5", "Δανεισμός Ηλεκτρογεννήτριας", "Προς Δήμο Γλυφάδας", "2025-12-05"),
        ("6", "Λήψη Φορτηγού", "Από Δήμο Αμαρουσίου", "2025-12-04"),
    ];

    rows.iter()
        .map(|(id, action, municipality, date)| Transaction {
            id: s(id),
            action: s(action),
            municipality: s(municipality),
            date: s(date),
            status: s("completed"),
        })
        .collect()
}

pub fn public_resources() -> Vec<PublicResource> {
    let rows = [
        ("1", "Γερανός 20 Τόνων", "Μηχανήματα", ResourceStatus::Available, "Δήμος Πειραιά"),
        ("2", "Φορτηγό Iveco", "Οχήματα", ResourceStatus::InUse, "Δήμος Αμαρουσίου"),
        ("3", "Αντλία Λυμάτων", "Εξοπλισμός", ResourceStatus::Available, "Δήμος Περιστερίου"),
        ("4", "Ηλεκτρογεννήτρια 100KW", "Μηχανήματα", ResourceStatus::Available, "Δήμος Χαλανδρίου"),
    ];

    rows.iter()
        .map(|(id, name, category, status, municipality)| PublicResource {
            id: s(id),
            name: s(name),
            category: s(category),
            status: s(status.label()),
            municipality: s(municipality),
        })
        .collect()
}

// ==================== ADMIN ====================

pub fn rbac_users() -> Vec<RbacUser> {
    let rows = [
        ("1", "Γιώργος Παπαδόπουλος", "g.papadopoulos@athens.gr", Role::Employee, "Δήμος Αθηναίων"),
        ("2", "Μαρία Κωνσταντίνου", "m.konstantinou@piraeus.gr", Role::Approver, "Δήμος Πειραιά"),
        ("3", "Νίκος Αλεξόπουλος", "n.alexopoulos@kallithea.gr", Role::Employee, "Δήμος Καλλιθέας"),
        ("4", "Ελένη Δημητρίου", "e.dimitriou@admin.gr", Role::Admin, "Κεντρικό Σύστημα"),
    ];

    rows.iter()
        .map(|(id, name, email, role, municipality)| RbacUser {
            id: s(id),
            name: s(name),
            email: s(email),
            role: *role,
            municipality: s(municipality),
            status: UserStatus::Active,
        })
        .collect()
}

pub fn audit_entries() -> Vec<AuditEntry> {
    let rows = [
        ("1", "2025-12-09 14:30:25", "admin@efficiencity.gr", "Δημιουργία χρήστη", AuditCategory::User,
            "Νέος χρήστης: m.konstantinou@piraeus.gr με ρόλο Approver", "192.168.1.100"),
        ("2", "2025-12-09 13:45:12", "g.papadopoulos@athens.gr", "Έγκριση αίτησης", AuditCategory::Resource,
            "Εγκρίθηκε αίτηση #1234 για δανεισμό Εκσκαφέα", "192.168.1.105"),
        ("3", "2025-12-09 03:00:00", "system", "Αυτόματο Backup", AuditCategory::Backup,
            "Ολοκληρώθηκε πλήρες backup της βάσης δεδομένων (2.4GB)", "localhost"),
        ("4", "2025-12-08 16:22:45", "admin@efficiencity.gr", "Τροποποίηση ρόλου", AuditCategory::User,
            "Αλλαγή ρόλου χρήστη n.alexopoulos@kallithea.gr από Employee σε Approver", "192.168.1.100"),
        ("5", "2025-12-08 15:10:33", "admin@efficiencity.gr", "Επανεκκίνηση υπηρεσίας", AuditCategory::System,
            "Επανεκκίνηση Cache Service λόγω χαμηλής απόδοσης", "192.168.1.100"),
        ("6", "2025-12-08 14:05:18", "g.papadopoulos@athens.gr", "Καταγραφή πόρου", AuditCategory::Resource,
            "Καταγραφή νέου πόρου: Γεννήτρια 50KW", "192.168.1.105"),
        ("7", "2025-12-08 11:30:00", "m.konstantinou@piraeus.gr", "Απόρριψη αίτησης", AuditCategory::Resource,
            "Απορρίφθηκε αίτηση #1230 λόγω έλλειψης διαθεσιμότητας", "192.168.1.110"),
    ];

    rows.iter()
        .map(|(id, timestamp, user, action, category, details, ip)| AuditEntry {
            id: s(id),
            timestamp: s(timestamp),
            user: s(user),
            action: s(action),
            category: *category,
            details: s(details),
            ip_address: s(ip),
        })
        .collect()
}

pub fn backups() -> Vec<Backup> {
    let rows = [
        ("1", "backup_full_20251209_030000.sql", BackupType::Full, "2.4 GB", "2025-12-09 03:00"),
        ("2", "backup_incr_20251208_030000.sql", BackupType::Incremental, "156 MB", "2025-12-08 03:00"),
        ("3", "backup_full_20251207_030000.sql", BackupType::Full, "2.3 GB", "2025-12-07 03:00"),
        ("4", "backup_incr_20251206_030000.sql", BackupType::Incremental, "142 MB", "2025-12-06 03:00"),
    ];

    rows.iter()
        .map(|(id, filename, backup_type, size, timestamp)| Backup {
            id: s(id),
            filename: s(filename),
            backup_type: *backup_type,
            size: s(size),
            timestamp: s(timestamp),
            status: BackupStatus::Completed,
        })
        .collect()
}

pub fn system_metrics() -> SystemMetrics {
    SystemMetrics {
        cpu: UsageGauge { usage: 45, status: HealthStatus::Normal },
        memory: CapacityGauge { usage: 68, total_gb: 16.0, used_gb: 10.88, status: HealthStatus::Normal },
        disk: CapacityGauge { usage: 72, total_gb: 500.0, used_gb: 360.0, status: HealthStatus::Warning },
        uptime: Uptime { days: 45, hours: 12, minutes: 34 },
    }
}

pub fn services() -> Vec<ServiceHealth> {
    let rows = [
        ("API Server", ServiceStatus::Running, "45ms", "99.9%"),
        ("Database", ServiceStatus::Running, "12ms", "99.8%"),
        ("Web Server", ServiceStatus::Running, "28ms", "99.9%"),
        ("Cache Service", ServiceStatus::Warning, "156ms", "98.5%"),
    ];

    rows.iter()
        .map(|(name, status, response_time, uptime)| ServiceHealth {
            name: s(name),
            status: *status,
            response_time: s(response_time),
            uptime: s(uptime),
        })
        .collect()
}

pub fn alerts() -> Vec<SystemAlert> {
    let rows = [
        ("1", AlertKind::Warning, "Χαμηλή απόδοση Cache Service - Response time > 150ms", "2025-12-09 14:23", "Cache"),
        ("2", AlertKind::Warning, "Disk usage πάνω από 70%", "2025-12-09 13:45", "Storage"),
        ("3", AlertKind::Info, "Scheduled backup ολοκληρώθηκε επιτυχώς", "2025-12-09 03:00", "Backup"),
    ];

    rows.iter()
        .map(|(id, kind, message, timestamp, service)| SystemAlert {
            id: s(id),
            kind: *kind,
            message: s(message),
            timestamp: s(timestamp),
            service: s(service),
        })
        .collect()
}

// ==================== MUNICIPAL ====================

pub fn own_resources() -> Vec<OwnResourceSummary> {
    let rows = [
        (1, "Φορτηγά Απορριμμάτων", ResourceKind::Truck, 12, 8, 4, "Οχήματα", Availability::Good),
        (2, "Εργατικό Προσωπικό", ResourceKind::Worker, 45, 32, 13, "Ανθρώπινοι Πόροι", Availability::Good),
        (3, "Εξοπλισμός Καθαριότητας", ResourceKind::Tools, 28, 15, 13, "Εξοπλισμός", Availability::Warning),
        (4, "Διοικητικό Προσωπικό", ResourceKind::Staff, 20, 18, 2, "Ανθρώπινοι Πόροι", Availability::Good),
        (5, "Μικρά Οχήματα", ResourceKind::Truck, 8, 3, 5, "Οχήματα", Availability::Critical),
        (6, "Εργαλεία Συντήρησης", ResourceKind::Tools, 50, 42, 8, "Εξοπλισμός", Availability::Good),
    ];

    rows.iter()
        .map(|(id, name, kind, total, available, in_use, category, availability)| OwnResourceSummary {
            id: *id,
            name: s(name),
            kind: *kind,
            total: *total,
            available: *available,
            in_use: *in_use,
            category: s(category),
            availability: *availability,
        })
        .collect()
}

fn available(name: &str, count: u32, kind: ResourceKind) -> AvailableResource {
    AvailableResource { name: s(name), available: count, kind }
}

pub fn municipality_directory() -> Vec<MunicipalityDirectoryEntry> {
    use ResourceKind::*;

    let entry = |id: u32, name: &str, distance: &str, resources: Vec<AvailableResource>, total: u32| {
        MunicipalityDirectoryEntry {
            id,
            name: s(name),
            distance: s(distance),
            resources,
            total_resources: total,
            status: s("active"),
        }
    };

    vec![
        entry(1, "Δήμος Θεσσαλονίκης", "502 km", vec![
            available("Φορτηγά Απορριμμάτων", 5, Truck),
            available("Εργατικό Προσωπικό", 15, Worker),
            available("Εξοπλισμός Καθαριότητας", 8, Tools),
        ], 28),
        entry(2, "Δήμος Πατρών", "215 km", vec![
            available("Φορτηγά Απορριμμάτων", 3, Truck),
            available("Εργατικό Προσωπικό", 12, Worker),
            available("Μικρά Οχήματα", 6, Truck),
        ], 21),
        entry(3, "Δήμος Ηρακλείου", "340 km", vec![
            available("Εργατικό Προσωπικό", 20, Worker),
            available("Εξοπλισμός Καθαριότητας", 12, Tools),
            available("Εργαλεία Συντήρησης", 18, Tools),
        ], 50),
        entry(4, "Δήμος Λάρισας", "355 km", vec![
            available("Φορτηγά Απορριμμάτων", 4, Truck),
            available("Μικρά Οχήματα", 8, Truck),
            available("Εργατικό Προσωπικό", 10, Worker),
        ], 22),
        entry(5, "Δήμος Βόλου", "326 km", vec![
            available("Εξοπλισμός Καθαριότητας", 15, Tools),
            available("Εργαλεία Συντήρησης", 22, Tools),
            available("Εργατικό Προσωπικό", 8, Worker),
        ], 45),
    ]
}

pub fn lending_municipalities() -> Vec<Choice> {
    ["Δήμος Θεσσαλονίκης", "Δήμος Πατρών", "Δήμος Ηρακλείου", "Δήμος Λάρισας", "Δήμος Βόλου"]
        .iter()
        .zip(1..)
        .map(|(name, id)| Choice { id, name: s(name), category: None })
        .collect()
}

pub fn borrowable_resource_types() -> Vec<Choice> {
    [
        ("Φορτηγά Απορριμμάτων", "Οχήματα"),
        ("Μικρά Οχήματα", "Οχήματα"),
        ("Εργατικό Προσωπικό", "Ανθρώπινοι Πόροι"),
        ("Διοικητικό Προσωπικό", "Ανθρώπινοι Πόροι"),
        ("Εξοπλισμός Καθαριότητας", "Εξοπλισμός"),
        ("Εργαλεία Συντήρησης", "Εξοπλισμός"),
    ]
    .iter()
    .zip(1..)
    .map(|((name, category), id)| Choice { id, name: s(name), category: Some(s(category)) })
    .collect()
}

pub fn lend_requests() -> Vec<LendRequest> {
    let rows = [
        (1, "Δήμος Πειραιά", "Φορτηγά Απορριμμάτων", 3, "2025-12-10", "2025-12-17",
            "Αυξημένες ανάγκες λόγω εορταστικής περιόδου", RequestStatus::Pending, "2025-12-05"),
        (2, "Δήμος Καλλιθέας", "Εργατικό Προσωπικό", 8, "2025-12-08", "2025-12-15",
            "Ειδικό πρόγραμμα καθαριότητας", RequestStatus::Pending, "2025-12-04"),
        (3, "Δήμος Αμαρουσίου", "Εξοπλισμός Καθαριότητας", 5, "2025-12-12", "2025-12-20",
            "Συντήρηση δημοτικών χώρων", RequestStatus::Approved, "2025-12-03"),
        (4, "Δήμος Γλυφάδας", "Μικρά Οχήματα", 2, "2025-12-06", "2025-12-13",
            "Συντήρηση εξοπλισμού δήμου", RequestStatus::Rejected, "2025-12-02"),
    ];

    rows.iter()
        .map(|(id, municipality, resource, quantity, start, end, reason, status, requested)| LendRequest {
            id: *id,
            municipality: s(municipality),
            resource: s(resource),
            quantity: *quantity,
            start_date: s(start),
            end_date: s(end),
            reason: s(reason),
            status: *status,
            request_date: s(requested),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_set_sizes() {
        assert_eq!(my_resources().len(), 5);
        assert_eq!(other_municipality_resources().len(), 8);
        assert_eq!(incoming_requests().len(), 3);
        assert_eq!(recent_transactions().len(), 6);
        assert_eq!(public_resources().len(), 4);
        assert_eq!(rbac_users().len(), 4);
        assert_eq!(audit_entries().len(), 7);
        assert_eq!(backups().len(), 4);
        assert_eq!(own_resources().len(), 6);
        assert_eq!(municipality_directory().len(), 5);
        assert_eq!(lend_requests().len(), 4);
    }

    #[test]
    fn test_each_call_returns_a_fresh_copy() {
        let mut first = incoming_requests();
        first[0].status = RequestStatus::Approved;
        assert_eq!(incoming_requests()[0].status, RequestStatus::Pending);
    }

    #[test]
    fn test_category_totals_match_report() {
        let report = report_data();
        let sum: u32 = report.resources_by_category.iter().map(|c| c.count).sum();
        assert_eq!(sum, report.total_resources);
    }
}

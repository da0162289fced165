//! Registry of well-known folder kinds.
//!
//! Every folder kind the server can address by logical name, plus the
//! non-deleteable system folders that only ever show up in traversal
//! results. The localized name tables drive folder-name-to-kind matching
//! for accounts whose display language is not English.

use mailvane_ews::ExchangeVersion;

use super::model::FolderKind;

/// Generic mail folder; the fallback kind for anything the container class
/// does not identify more precisely.
pub static GENERIC_FOLDER: FolderKind = FolderKind {
    name: "Folder",
    distinguished_id: None,
    container_class: Some("IPF.Note"),
    get_folder_allowed: true,
    supported_from: None,
    localized: &[],
};

/// Root of the primary mailbox hierarchy.
pub static ROOT: FolderKind = FolderKind {
    name: "Root",
    distinguished_id: Some("root"),
    container_class: None,
    get_folder_allowed: true,
    supported_from: None,
    localized: &[],
};

/// Root of the public folder hierarchy.
pub static PUBLIC_FOLDERS_ROOT: FolderKind = FolderKind {
    name: "PublicFoldersRoot",
    distinguished_id: Some("publicfoldersroot"),
    container_class: None,
    get_folder_allowed: true,
    supported_from: Some(ExchangeVersion::Exchange2007Sp1),
    localized: &[],
};

/// Root of the archive mailbox hierarchy.
pub static ARCHIVE_ROOT: FolderKind = FolderKind {
    name: "ArchiveRoot",
    distinguished_id: Some("archiveroot"),
    container_class: None,
    get_folder_allowed: true,
    supported_from: Some(ExchangeVersion::Exchange2010Sp1),
    localized: &[],
};

/// "Top of Information Store": the folder that usually contains the
/// standard distinguished folders of an account.
pub static MSG_FOLDER_ROOT: FolderKind = FolderKind {
    name: "MsgFolderRoot",
    distinguished_id: Some("msgfolderroot"),
    container_class: None,
    get_folder_allowed: true,
    supported_from: None,
    localized: &[
        ("da_DK", &["informationslager", "top of information store"]),
        ("de_DE", &["oberste ebene des informationsspeicher"]),
        ("en_US", &["top of information store"]),
    ],
};

/// Inbox.
pub static INBOX: FolderKind = FolderKind {
    name: "Inbox",
    distinguished_id: Some("inbox"),
    container_class: Some("IPF.Note"),
    get_folder_allowed: true,
    supported_from: None,
    localized: &[
        ("da_DK", &["indbakke"]),
        ("de_DE", &["posteingang"]),
        ("en_US", &["inbox"]),
        ("es_ES", &["bandeja de entrada"]),
        ("fr_CA", &["bo\u{ee}te de r\u{e9}ception"]),
        ("nl_NL", &["postvak in"]),
        ("ru_RU", &["\u{432}\u{445}\u{43e}\u{434}\u{44f}\u{449}\u{438}\u{435}"]),
        ("sv_SE", &["inkorgen"]),
    ],
};

/// Calendar.
pub static CALENDAR: FolderKind = FolderKind {
    name: "Calendar",
    distinguished_id: Some("calendar"),
    container_class: Some("IPF.Appointment"),
    get_folder_allowed: true,
    supported_from: None,
    localized: &[
        ("da_DK", &["kalender"]),
        ("de_DE", &["kalender"]),
        ("en_US", &["calendar"]),
        ("es_ES", &["calendario"]),
        ("fr_CA", &["calendrier"]),
        ("nl_NL", &["agenda"]),
        ("ru_RU", &["\u{43a}\u{430}\u{43b}\u{435}\u{43d}\u{434}\u{430}\u{440}\u{44c}"]),
        ("sv_SE", &["kalender"]),
    ],
};

/// Contacts.
pub static CONTACTS: FolderKind = FolderKind {
    name: "Contacts",
    distinguished_id: Some("contacts"),
    container_class: Some("IPF.Contact"),
    get_folder_allowed: true,
    supported_from: None,
    localized: &[
        ("da_DK", &["personer", "kontakter"]),
        ("de_DE", &["kontakte"]),
        ("en_US", &["contacts"]),
        ("es_ES", &["contactos"]),
        ("fr_CA", &["contacts"]),
        ("nl_NL", &["contactpersonen"]),
        ("ru_RU", &["\u{43a}\u{43e}\u{43d}\u{442}\u{430}\u{43a}\u{442}\u{44b}"]),
        ("sv_SE", &["kontakter"]),
    ],
};

/// Recipient cache; behaves like a contacts folder but is its own kind and
/// must never be mistaken for [`CONTACTS`].
pub static RECIPIENT_CACHE: FolderKind = FolderKind {
    name: "RecipientCache",
    distinguished_id: Some("recipientcache"),
    container_class: Some("IPF.Contact.RecipientCache"),
    get_folder_allowed: true,
    supported_from: Some(ExchangeVersion::Exchange2013),
    localized: &[],
};

/// Deleted items.
pub static DELETED_ITEMS: FolderKind = FolderKind {
    name: "DeletedItems",
    distinguished_id: Some("deleteditems"),
    container_class: Some("IPF.Note"),
    get_folder_allowed: true,
    supported_from: None,
    localized: &[
        ("da_DK", &["slettet post"]),
        ("de_DE", &["gel\u{f6}schte elemente"]),
        ("en_US", &["deleted items"]),
        ("es_ES", &["elementos eliminados"]),
        ("fr_CA", &["\u{e9}l\u{e9}ments supprim\u{e9}s"]),
        ("nl_NL", &["verwijderde items"]),
        ("ru_RU", &["\u{443}\u{434}\u{430}\u{43b}\u{435}\u{43d}\u{43d}\u{44b}\u{435}"]),
        ("sv_SE", &["borttaget"]),
    ],
};

/// Drafts.
pub static DRAFTS: FolderKind = FolderKind {
    name: "Drafts",
    distinguished_id: Some("drafts"),
    container_class: Some("IPF.Note"),
    get_folder_allowed: true,
    supported_from: None,
    localized: &[
        ("da_DK", &["kladder"]),
        ("de_DE", &["entw\u{fc}rfe"]),
        ("en_US", &["drafts"]),
        ("es_ES", &["borradores"]),
        ("fr_CA", &["brouillons"]),
        ("nl_NL", &["concepten"]),
        ("ru_RU", &["\u{447}\u{435}\u{440}\u{43d}\u{43e}\u{432}\u{438}\u{43a}\u{438}"]),
        ("sv_SE", &["utkast"]),
    ],
};

/// Journal.
pub static JOURNAL: FolderKind = FolderKind {
    name: "Journal",
    distinguished_id: Some("journal"),
    container_class: Some("IPF.Journal"),
    get_folder_allowed: true,
    supported_from: None,
    localized: &[
        ("da_DK", &["journal"]),
        ("de_DE", &["journal"]),
        ("en_US", &["journal"]),
        ("es_ES", &["diario"]),
        ("fr_CA", &["journal"]),
        ("nl_NL", &["logboek"]),
        ("ru_RU", &["\u{436}\u{443}\u{440}\u{43d}\u{430}\u{43b}"]),
        ("sv_SE", &["journal"]),
    ],
};

/// Junk email.
pub static JUNK_EMAIL: FolderKind = FolderKind {
    name: "JunkEmail",
    distinguished_id: Some("junkemail"),
    container_class: Some("IPF.Note"),
    get_folder_allowed: true,
    supported_from: None,
    localized: &[
        ("da_DK", &["u\u{f8}nsket e-mail"]),
        ("de_DE", &["junk-e-mail"]),
        ("en_US", &["junk e-mail", "junk email"]),
        ("es_ES", &["correo no deseado"]),
        ("fr_CA", &["courrier ind\u{e9}sirable"]),
        ("nl_NL", &["ongewenste e-mail"]),
        (
            "ru_RU",
            &["\u{43d}\u{435}\u{436}\u{435}\u{43b}\u{430}\u{442}\u{435}\u{43b}\u{44c}\u{43d}\u{430}\u{44f} \u{43f}\u{43e}\u{447}\u{442}\u{430}"],
        ),
        ("sv_SE", &["skr\u{e4}ppost"]),
    ],
};

/// Notes.
pub static NOTES: FolderKind = FolderKind {
    name: "Notes",
    distinguished_id: Some("notes"),
    container_class: Some("IPF.StickyNote"),
    get_folder_allowed: true,
    supported_from: None,
    localized: &[
        ("da_DK", &["noter"]),
        ("de_DE", &["notizen"]),
        ("en_US", &["notes"]),
        ("es_ES", &["notas"]),
        ("fr_CA", &["notes"]),
        ("nl_NL", &["notities"]),
        ("ru_RU", &["\u{437}\u{430}\u{43c}\u{435}\u{442}\u{43a}\u{438}"]),
        ("sv_SE", &["anteckningar"]),
    ],
};

/// Outbox.
pub static OUTBOX: FolderKind = FolderKind {
    name: "Outbox",
    distinguished_id: Some("outbox"),
    container_class: Some("IPF.Note"),
    get_folder_allowed: true,
    supported_from: None,
    localized: &[
        ("da_DK", &["udbakke"]),
        ("de_DE", &["postausgang"]),
        ("en_US", &["outbox"]),
        ("es_ES", &["bandeja de salida"]),
        ("fr_CA", &["bo\u{ee}te d'envoi"]),
        ("nl_NL", &["postvak uit"]),
        ("ru_RU", &["\u{438}\u{441}\u{445}\u{43e}\u{434}\u{44f}\u{449}\u{438}\u{435}"]),
        ("sv_SE", &["utkorgen"]),
    ],
};

/// Sent items.
pub static SENT_ITEMS: FolderKind = FolderKind {
    name: "SentItems",
    distinguished_id: Some("sentitems"),
    container_class: Some("IPF.Note"),
    get_folder_allowed: true,
    supported_from: None,
    localized: &[
        ("da_DK", &["sendt post"]),
        ("de_DE", &["gesendete elemente"]),
        ("en_US", &["sent items"]),
        ("es_ES", &["elementos enviados"]),
        ("fr_CA", &["\u{e9}l\u{e9}ments envoy\u{e9}s"]),
        ("nl_NL", &["verzonden items"]),
        ("ru_RU", &["\u{43e}\u{442}\u{43f}\u{440}\u{430}\u{432}\u{43b}\u{435}\u{43d}\u{43d}\u{44b}\u{435}"]),
        ("sv_SE", &["skickat"]),
    ],
};

/// Tasks.
pub static TASKS: FolderKind = FolderKind {
    name: "Tasks",
    distinguished_id: Some("tasks"),
    container_class: Some("IPF.Task"),
    get_folder_allowed: true,
    supported_from: None,
    localized: &[
        ("da_DK", &["opgaver"]),
        ("de_DE", &["aufgaben"]),
        ("en_US", &["tasks"]),
        ("es_ES", &["tareas"]),
        ("fr_CA", &["t\u{e2}ches"]),
        ("nl_NL", &["taken"]),
        ("ru_RU", &["\u{437}\u{430}\u{434}\u{430}\u{447}\u{438}"]),
        ("sv_SE", &["uppgifter"]),
    ],
};

/// Sync issues.
pub static SYNC_ISSUES: FolderKind = FolderKind {
    name: "SyncIssues",
    distinguished_id: Some("syncissues"),
    container_class: Some("IPF.Note"),
    get_folder_allowed: true,
    supported_from: Some(ExchangeVersion::Exchange2013),
    localized: &[
        ("da_DK", &["synkroniseringsproblemer"]),
        ("de_DE", &["synchronisierungsprobleme"]),
        ("en_US", &["sync issues"]),
    ],
};

/// Archive mailbox deleted items.
pub static ARCHIVE_DELETED_ITEMS: FolderKind = FolderKind {
    name: "ArchiveDeletedItems",
    distinguished_id: Some("archivedeleteditems"),
    container_class: Some("IPF.Note"),
    get_folder_allowed: true,
    supported_from: Some(ExchangeVersion::Exchange2010Sp1),
    localized: &[],
};

/// Archive mailbox inbox.
pub static ARCHIVE_INBOX: FolderKind = FolderKind {
    name: "ArchiveInbox",
    distinguished_id: Some("archiveinbox"),
    container_class: Some("IPF.Note"),
    get_folder_allowed: true,
    supported_from: Some(ExchangeVersion::Exchange2013Sp1),
    localized: &[],
};

/// "Top of Information Store" of the archive mailbox.
pub static ARCHIVE_MSG_FOLDER_ROOT: FolderKind = FolderKind {
    name: "ArchiveMsgFolderRoot",
    distinguished_id: Some("archivemsgfolderroot"),
    container_class: None,
    get_folder_allowed: true,
    supported_from: Some(ExchangeVersion::Exchange2010Sp1),
    localized: &[],
};

/// Recoverable items root of the archive mailbox.
pub static ARCHIVE_RECOVERABLE_ITEMS_ROOT: FolderKind = FolderKind {
    name: "ArchiveRecoverableItemsRoot",
    distinguished_id: Some("archiverecoverableitemsroot"),
    container_class: None,
    get_folder_allowed: true,
    supported_from: Some(ExchangeVersion::Exchange2010Sp1),
    localized: &[],
};

/// Recoverable item deletions of the archive mailbox.
pub static ARCHIVE_RECOVERABLE_ITEMS_DELETIONS: FolderKind = FolderKind {
    name: "ArchiveRecoverableItemsDeletions",
    distinguished_id: Some("archiverecoverableitemsdeletions"),
    container_class: None,
    get_folder_allowed: true,
    supported_from: Some(ExchangeVersion::Exchange2010Sp1),
    localized: &[],
};

/// Recoverable item purges of the archive mailbox.
pub static ARCHIVE_RECOVERABLE_ITEMS_PURGES: FolderKind = FolderKind {
    name: "ArchiveRecoverableItemsPurges",
    distinguished_id: Some("archiverecoverableitemspurges"),
    container_class: None,
    get_folder_allowed: true,
    supported_from: Some(ExchangeVersion::Exchange2010Sp1),
    localized: &[],
};

/// Recoverable item versions of the archive mailbox.
pub static ARCHIVE_RECOVERABLE_ITEMS_VERSIONS: FolderKind = FolderKind {
    name: "ArchiveRecoverableItemsVersions",
    distinguished_id: Some("archiverecoverableitemsversions"),
    container_class: None,
    get_folder_allowed: true,
    supported_from: Some(ExchangeVersion::Exchange2010Sp1),
    localized: &[],
};

/// Outlook's "Common Views" system folder.
pub static COMMON_VIEWS: FolderKind = FolderKind {
    name: "CommonViews",
    distinguished_id: None,
    container_class: None,
    get_folder_allowed: true,
    supported_from: None,
    localized: &[("en_US", &["common views"])],
};

/// Deferred action queue.
pub static DEFERRED_ACTION: FolderKind = FolderKind {
    name: "DeferredAction",
    distinguished_id: None,
    container_class: None,
    get_folder_allowed: true,
    supported_from: None,
    localized: &[("en_US", &["deferred action"])],
};

/// Free/busy data store.
pub static FREEBUSY_DATA: FolderKind = FolderKind {
    name: "FreebusyData",
    distinguished_id: None,
    container_class: None,
    get_folder_allowed: true,
    supported_from: None,
    localized: &[("en_US", &["freebusy data"])],
};

/// Recoverable items root ("dumpster") of the primary mailbox.
pub static RECOVERABLE_ITEMS_ROOT: FolderKind = FolderKind {
    name: "RecoverableItemsRoot",
    distinguished_id: Some("recoverableitemsroot"),
    container_class: None,
    get_folder_allowed: true,
    supported_from: Some(ExchangeVersion::Exchange2010),
    localized: &[("en_US", &["recoverable items"])],
};

/// Recoverable item deletions of the primary mailbox.
pub static RECOVERABLE_ITEMS_DELETIONS: FolderKind = FolderKind {
    name: "RecoverableItemsDeletions",
    distinguished_id: Some("recoverableitemsdeletions"),
    container_class: None,
    get_folder_allowed: true,
    supported_from: Some(ExchangeVersion::Exchange2010),
    localized: &[("en_US", &["deletions"])],
};

/// Outlook shortcut list.
pub static SHORTCUTS: FolderKind = FolderKind {
    name: "Shortcuts",
    distinguished_id: None,
    container_class: None,
    get_folder_allowed: true,
    supported_from: None,
    localized: &[("en_US", &["shortcuts"])],
};

/// Spooler queue.
pub static SPOOLER_QUEUE: FolderKind = FolderKind {
    name: "SpoolerQueue",
    distinguished_id: None,
    container_class: None,
    get_folder_allowed: true,
    supported_from: None,
    localized: &[("en_US", &["spooler queue"])],
};

/// System folder; answers item queries but not folder lookups.
pub static SYSTEM: FolderKind = FolderKind {
    name: "System",
    distinguished_id: None,
    container_class: None,
    get_folder_allowed: false,
    supported_from: None,
    localized: &[("en_US", &["system"])],
};

/// Outlook view definitions.
pub static VIEWS: FolderKind = FolderKind {
    name: "Views",
    distinguished_id: None,
    container_class: None,
    get_folder_allowed: true,
    supported_from: None,
    localized: &[("en_US", &["views"])],
};

/// Well-known kinds that belong to the primary mailbox hierarchy. The root
/// kinds themselves are not in this list.
pub static WELLKNOWN_FOLDERS_IN_ROOT: &[&FolderKind] = &[
    &MSG_FOLDER_ROOT,
    &CALENDAR,
    &CONTACTS,
    &RECIPIENT_CACHE,
    &DELETED_ITEMS,
    &DRAFTS,
    &INBOX,
    &JOURNAL,
    &JUNK_EMAIL,
    &NOTES,
    &OUTBOX,
    &SENT_ITEMS,
    &TASKS,
    &SYNC_ISSUES,
    &RECOVERABLE_ITEMS_ROOT,
    &RECOVERABLE_ITEMS_DELETIONS,
];

/// Well-known kinds that belong to the archive mailbox hierarchy.
pub static WELLKNOWN_FOLDERS_IN_ARCHIVE_ROOT: &[&FolderKind] = &[
    &ARCHIVE_DELETED_ITEMS,
    &ARCHIVE_INBOX,
    &ARCHIVE_MSG_FOLDER_ROOT,
    &ARCHIVE_RECOVERABLE_ITEMS_ROOT,
    &ARCHIVE_RECOVERABLE_ITEMS_DELETIONS,
    &ARCHIVE_RECOVERABLE_ITEMS_PURGES,
    &ARCHIVE_RECOVERABLE_ITEMS_VERSIONS,
];

/// System folders that exist in every mailbox and cannot be deleted.
pub static NON_DELETEABLE_FOLDERS: &[&FolderKind] = &[
    &COMMON_VIEWS,
    &DEFERRED_ACTION,
    &FREEBUSY_DATA,
    &SHORTCUTS,
    &SPOOLER_QUEUE,
    &SYSTEM,
    &VIEWS,
];

/// Looks up a kind by its well-known container class, falling back to the
/// generic folder kind. Transport implementations use this to assign kinds
/// to traversal results.
#[must_use]
pub fn kind_from_container_class(container_class: Option<&str>) -> &'static FolderKind {
    let Some(class) = container_class else {
        return &GENERIC_FOLDER;
    };
    match class {
        "IPF.Appointment" => &CALENDAR,
        "IPF.Contact" => &CONTACTS,
        "IPF.Contact.RecipientCache" => &RECIPIENT_CACHE,
        "IPF.Journal" => &JOURNAL,
        "IPF.StickyNote" => &NOTES,
        "IPF.Task" => &TASKS,
        _ => &GENERIC_FOLDER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wellknown_lists_have_distinguished_ids() {
        for kind in WELLKNOWN_FOLDERS_IN_ROOT
            .iter()
            .chain(WELLKNOWN_FOLDERS_IN_ARCHIVE_ROOT)
        {
            assert!(
                kind.distinguished_id.is_some(),
                "{} has no distinguished id",
                kind.name
            );
        }
    }

    #[test]
    fn registry_names_are_unique() {
        let mut names: Vec<&str> = WELLKNOWN_FOLDERS_IN_ROOT
            .iter()
            .chain(WELLKNOWN_FOLDERS_IN_ARCHIVE_ROOT)
            .chain(NON_DELETEABLE_FOLDERS)
            .map(|k| k.name)
            .collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len());
    }

    #[test]
    fn container_class_lookup() {
        assert_eq!(kind_from_container_class(Some("IPF.Appointment")), &CALENDAR);
        assert_eq!(
            kind_from_container_class(Some("IPF.Contact.RecipientCache")),
            &RECIPIENT_CACHE
        );
        assert_eq!(kind_from_container_class(Some("IPF.Unknown")), &GENERIC_FOLDER);
        assert_eq!(kind_from_container_class(None), &GENERIC_FOLDER);
    }
}

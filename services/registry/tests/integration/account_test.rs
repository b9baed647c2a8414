use std::sync::atomic::{AtomicBool, Ordering};

use uuid::Uuid;

use rito_registry::domain::repository::RitoAccountRepository;
use rito_registry::domain::types::RitoAccount;
use rito_registry::error::RegistryServiceError;
use rito_registry::usecase::account::{
    BrowserRegisterInput, BrowserRegisterUseCase, EnsureDefaultAccountUseCase,
    ListUserDevicesUseCase, LookupAccountUseCase,
};

use crate::helpers::{
    MockAccountRepo, MockDeviceRepo, MockSocialRepo, MockUserRepo, test_account, test_device,
    test_user,
};

/// Account store where a concurrent binder claims the device between the
/// unbound check and the insert: the first `find_by_device` reports the
/// device free, everything after that sees the winner's row.
struct ContendedAccountRepo {
    inner: MockAccountRepo,
    raced: AtomicBool,
}

impl RitoAccountRepository for ContendedAccountRepo {
    async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<RitoAccount>, RegistryServiceError> {
        self.inner.find_by_user(user_id).await
    }

    async fn find_by_device(
        &self,
        device_id: Uuid,
    ) -> Result<Option<RitoAccount>, RegistryServiceError> {
        if !self.raced.swap(true, Ordering::SeqCst) {
            return Ok(None);
        }
        self.inner.find_by_device(device_id).await
    }

    async fn rito_id_exists(&self, rito_id: &str) -> Result<bool, RegistryServiceError> {
        self.inner.rito_id_exists(rito_id).await
    }

    async fn create(&self, account: &RitoAccount) -> Result<(), RegistryServiceError> {
        self.inner.create(account).await
    }

    async fn set_device(
        &self,
        account_id: Uuid,
        device_id: Uuid,
    ) -> Result<(), RegistryServiceError> {
        self.inner.set_device(account_id, device_id).await
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<RitoAccount>, RegistryServiceError> {
        self.inner.list_by_user(user_id).await
    }
}

#[tokio::test]
async fn should_register_unknown_device_to_anonymous_account() {
    let mock_devices = MockDeviceRepo::empty();
    let mock_accounts = MockAccountRepo::empty();
    let devices_handle = mock_devices.devices_handle();
    let accounts_handle = mock_accounts.accounts_handle();

    let uc = BrowserRegisterUseCase {
        devices: mock_devices,
        accounts: mock_accounts,
        users: MockUserRepo::empty(),
    };
    let out = uc
        .execute(BrowserRegisterInput {
            ieda: "ieda-1001".to_owned(),
            code: "424242".to_owned(),
            username: None,
        })
        .await
        .unwrap();

    assert!(out.rito_id.starts_with("RITO-"));
    assert_eq!(out.username, None);

    let devices = devices_handle.lock().unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].registration_code, "424242");
    assert_eq!(devices[0].mac_address, "MAC_ieda-100");

    let accounts = accounts_handle.lock().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].name, "Default Account");
    assert_eq!(accounts[0].user_id, None);
    assert_eq!(accounts[0].device_id, Some(devices[0].id));
}

#[tokio::test]
async fn should_bind_known_device_to_named_user() {
    let user = test_user("alice");
    let device = test_device("ieda-1002");
    let device_id = device.id;

    let mock_accounts = MockAccountRepo::empty();
    let accounts_handle = mock_accounts.accounts_handle();

    let uc = BrowserRegisterUseCase {
        devices: MockDeviceRepo::new(vec![device]),
        accounts: mock_accounts,
        users: MockUserRepo::new(vec![user.clone()]),
    };
    let out = uc
        .execute(BrowserRegisterInput {
            ieda: "ieda-1002".to_owned(),
            code: "987654".to_owned(),
            username: Some("alice".to_owned()),
        })
        .await
        .unwrap();

    assert_eq!(out.username.as_deref(), Some("alice"));

    let accounts = accounts_handle.lock().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].name, "alice's Account");
    assert_eq!(accounts[0].user_id, Some(user.id));
    assert_eq!(accounts[0].device_id, Some(device_id));
}

#[tokio::test]
async fn should_reassign_existing_account_instead_of_duplicating() {
    let user = test_user("alice");
    let old_device = test_device("ieda-old");
    let new_device = test_device("ieda-new");
    let new_device_id = new_device.id;
    let account = test_account(Some(user.id), Some(old_device.id));
    let rito_id = account.rito_id.clone();

    let mock_accounts = MockAccountRepo::new(vec![account]);
    let accounts_handle = mock_accounts.accounts_handle();

    let uc = BrowserRegisterUseCase {
        devices: MockDeviceRepo::new(vec![old_device, new_device]),
        accounts: mock_accounts,
        users: MockUserRepo::new(vec![user]),
    };
    let out = uc
        .execute(BrowserRegisterInput {
            ieda: "ieda-new".to_owned(),
            code: "111222".to_owned(),
            username: Some("alice".to_owned()),
        })
        .await
        .unwrap();

    assert_eq!(out.rito_id, rito_id, "existing Rito ID is kept");

    let accounts = accounts_handle.lock().unwrap();
    assert_eq!(accounts.len(), 1, "binding again must not add an account");
    assert_eq!(accounts[0].device_id, Some(new_device_id));
}

#[tokio::test]
async fn should_reject_register_of_already_bound_device() {
    let device = test_device("ieda-1003");
    let account = test_account(None, Some(device.id));

    let uc = BrowserRegisterUseCase {
        devices: MockDeviceRepo::new(vec![device]),
        accounts: MockAccountRepo::new(vec![account]),
        users: MockUserRepo::empty(),
    };
    let result = uc
        .execute(BrowserRegisterInput {
            ieda: "ieda-1003".to_owned(),
            code: "424242".to_owned(),
            username: None,
        })
        .await;
    assert!(matches!(
        result,
        Err(RegistryServiceError::DeviceAlreadyRegistered)
    ));
}

#[tokio::test]
async fn should_report_conflict_when_losing_binding_race() {
    let device = test_device("ieda-1010");
    let winner = test_account(None, Some(device.id));

    let uc = BrowserRegisterUseCase {
        devices: MockDeviceRepo::new(vec![device]),
        accounts: ContendedAccountRepo {
            inner: MockAccountRepo::new(vec![winner]),
            raced: AtomicBool::new(false),
        },
        users: MockUserRepo::empty(),
    };
    let result = uc
        .execute(BrowserRegisterInput {
            ieda: "ieda-1010".to_owned(),
            code: "424242".to_owned(),
            username: None,
        })
        .await;

    assert!(
        matches!(result, Err(RegistryServiceError::DuplicateBinding)),
        "expected DuplicateBinding, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_malformed_registration_code() {
    let uc = BrowserRegisterUseCase {
        devices: MockDeviceRepo::empty(),
        accounts: MockAccountRepo::empty(),
        users: MockUserRepo::empty(),
    };
    for code in ["", "12345", "1234567", "12a456"] {
        let result = uc
            .execute(BrowserRegisterInput {
                ieda: "ieda-1004".to_owned(),
                code: code.to_owned(),
                username: None,
            })
            .await;
        assert!(
            matches!(result, Err(RegistryServiceError::InvalidCode)),
            "code {code:?} should be rejected"
        );
    }
}

#[tokio::test]
async fn should_reject_register_for_unknown_username() {
    let uc = BrowserRegisterUseCase {
        devices: MockDeviceRepo::empty(),
        accounts: MockAccountRepo::empty(),
        users: MockUserRepo::empty(),
    };
    let result = uc
        .execute(BrowserRegisterInput {
            ieda: "ieda-1005".to_owned(),
            code: "424242".to_owned(),
            username: Some("nobody".to_owned()),
        })
        .await;

    match result {
        Err(RegistryServiceError::UnknownUser(name)) => assert_eq!(name, "nobody"),
        other => panic!("expected UnknownUser, got {other:?}"),
    }
}

#[tokio::test]
async fn should_adopt_supplied_code_on_known_unbound_device() {
    let device = test_device("ieda-1006");
    let mock_devices = MockDeviceRepo::new(vec![device]);
    let devices_handle = mock_devices.devices_handle();

    let uc = BrowserRegisterUseCase {
        devices: mock_devices,
        accounts: MockAccountRepo::empty(),
        users: MockUserRepo::empty(),
    };
    uc.execute(BrowserRegisterInput {
        ieda: "ieda-1006".to_owned(),
        code: "777888".to_owned(),
        username: None,
    })
    .await
    .unwrap();

    let devices = devices_handle.lock().unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].registration_code, "777888");
}

#[tokio::test]
async fn should_ensure_default_account_idempotently() {
    let user = test_user("alice");
    let mock_accounts = MockAccountRepo::empty();
    let accounts_handle = mock_accounts.accounts_handle();

    let uc = EnsureDefaultAccountUseCase {
        accounts: mock_accounts,
    };
    let first = uc.execute(&user).await.unwrap();
    let second = uc.execute(&user).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(accounts_handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_resolve_account_and_platforms_for_device() {
    let device = test_device("ieda-1007");
    let account = test_account(None, Some(device.id));
    let account_id = account.id;
    let rito_id = account.rito_id.clone();

    let uc = LookupAccountUseCase {
        devices: MockDeviceRepo::new(vec![device]),
        accounts: MockAccountRepo::new(vec![account]),
        socials: MockSocialRepo::empty(),
    };
    let lookup = uc.execute("ieda-1007").await.unwrap();

    assert_eq!(lookup.account.id, account_id);
    assert_eq!(lookup.account.rito_id, rito_id);
    assert!(lookup.platforms.is_empty());
}

#[tokio::test]
async fn should_return_account_not_found_for_unbound_device() {
    let device = test_device("ieda-1008");

    let uc = LookupAccountUseCase {
        devices: MockDeviceRepo::new(vec![device]),
        accounts: MockAccountRepo::empty(),
        socials: MockSocialRepo::empty(),
    };
    let result = uc.execute("ieda-1008").await;
    assert!(matches!(result, Err(RegistryServiceError::AccountNotFound)));
}

#[tokio::test]
async fn should_list_devices_bound_to_user() {
    let user = test_user("alice");
    let device = test_device("ieda-1009");
    let account = test_account(Some(user.id), Some(device.id));
    let rito_id = account.rito_id.clone();

    let uc = ListUserDevicesUseCase {
        users: MockUserRepo::new(vec![user]),
        accounts: MockAccountRepo::new(vec![account]),
        devices: MockDeviceRepo::new(vec![device]),
    };
    let entries = uc.execute("alice").await.unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].ieda, "ieda-1009");
    assert_eq!(entries[0].rito_id, rito_id);
}

#[tokio::test]
async fn should_skip_accounts_without_device_in_listing() {
    let user = test_user("alice");
    let account = test_account(Some(user.id), None);

    let uc = ListUserDevicesUseCase {
        users: MockUserRepo::new(vec![user]),
        accounts: MockAccountRepo::new(vec![account]),
        devices: MockDeviceRepo::empty(),
    };
    let entries = uc.execute("alice").await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn should_return_not_found_when_listing_unknown_user() {
    let uc = ListUserDevicesUseCase {
        users: MockUserRepo::empty(),
        accounts: MockAccountRepo::empty(),
        devices: MockDeviceRepo::empty(),
    };
    let result = uc.execute("nobody").await;
    assert!(matches!(result, Err(RegistryServiceError::UserNotFound)));
}

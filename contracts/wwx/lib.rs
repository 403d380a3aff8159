#![cfg_attr(not(feature = "std"), no_std, no_main)]

#[ink::contract]
mod wwx {
    use ink::prelude::string::String;
    use ink::storage::Mapping;

    pub const TOKEN_NAME: &str = "Wowoo Exchange Token";
    pub const TOKEN_SYMBOL: &str = "WWX";
    pub const TOKEN_DECIMALS: u8 = 18;

    /// 4,770,799,141 whole tokens at 18 decimals.
    pub const MAX_SUPPLY: Balance = 4_770_799_141 * 1_000_000_000_000_000_000;

    pub type Result<T> = core::result::Result<T, Error>;

    #[derive(scale::Encode, scale::Decode, Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
    pub enum Error {
        InsufficientBalance,
        ZeroAddressSender,
        ZeroAddressRecipient,
        ZeroAddressApprove,
        ZeroAddressMint,
        InsufficientAllowance,
        AllowanceUnderflow,
        Overflow,
        NotOwner,
        ZeroAddressOwner,
    }

    impl Error {
        /// Revert reason reported to callers. Clients match on this text.
        pub fn reason(&self) -> &'static str {
            match self {
                Error::InsufficientBalance => "ERC20: transfer amount exceeds balance",
                Error::ZeroAddressSender => "ERC20: transfer from the zero address",
                Error::ZeroAddressRecipient => "ERC20: transfer to the zero address",
                Error::ZeroAddressApprove => "ERC20: approve to the zero address",
                Error::ZeroAddressMint => "ERC20: mint to the zero address",
                Error::InsufficientAllowance => "ERC20: transfer amount exceeds allowance",
                Error::AllowanceUnderflow => "ERC20: decreased allowance below zero",
                Error::Overflow => "SafeMath: addition overflow",
                Error::NotOwner => "Caller is not owner",
                Error::ZeroAddressOwner => "Owner cannot be set to zero address",
            }
        }
    }

    impl core::fmt::Display for Error {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.write_str(self.reason())
        }
    }

    #[ink(event)]
    pub struct Transfer {
        #[ink(topic)]
        from: AccountId,
        #[ink(topic)]
        to: AccountId,
        value: Balance,
    }

    #[ink(event)]
    pub struct Approval {
        #[ink(topic)]
        owner: AccountId,
        #[ink(topic)]
        spender: AccountId,
        value: Balance,
    }

    #[ink(event)]
    pub struct OwnershipTransferred {
        #[ink(topic)]
        old_owner: AccountId,
        #[ink(topic)]
        new_owner: AccountId,
    }

    /// The all-zero account. Never a valid holder, spender or owner.
    pub fn zero_address() -> AccountId {
        AccountId::from([0x00; 32])
    }

    #[ink(storage)]
    pub struct WwxToken {
        // administration
        owner_acc: AccountId,

        // token state
        total_supply: Balance,
        balances: Mapping<AccountId, Balance>,
        allowances: Mapping<(AccountId, AccountId), Balance>,
    }

    impl WwxToken {
        // -------- constructors --------

        /// Mints the whole fixed supply to `initial_holder`, who also becomes the owner.
        #[ink(constructor)]
        pub fn new(initial_holder: AccountId) -> Result<Self> {
            if initial_holder == zero_address() {
                return Err(Error::ZeroAddressMint)
            }

            let mut balances = Mapping::default();
            balances.insert(initial_holder, &MAX_SUPPLY);

            Self::env().emit_event(Transfer {
                from: zero_address(),
                to: initial_holder,
                value: MAX_SUPPLY,
            });
            Self::env().emit_event(OwnershipTransferred {
                old_owner: zero_address(),
                new_owner: initial_holder,
            });

            Ok(Self {
                owner_acc: initial_holder,
                total_supply: MAX_SUPPLY,
                balances,
                allowances: Mapping::default(),
            })
        }

        // -------- modifiers (helpers) --------

        /// Once ownership is renounced nobody passes this check, including the zero account.
        fn only_owner(&self) -> Result<()> {
            let caller_acc = self.env().caller();
            if self.owner_acc == zero_address() || caller_acc != self.owner_acc {
                return self.reject(Error::NotOwner)
            }
            Ok(())
        }

        fn reject<T>(&self, err: Error) -> Result<T> {
            ink::env::debug_println!("wwx: call from {:?} rejected: {}", self.env().caller(), err);
            Err(err)
        }

        // -------- metadata --------

        #[ink(message)]
        pub fn name(&self) -> String {
            String::from(TOKEN_NAME)
        }

        #[ink(message)]
        pub fn symbol(&self) -> String {
            String::from(TOKEN_SYMBOL)
        }

        #[ink(message)]
        pub fn decimals(&self) -> u8 {
            TOKEN_DECIMALS
        }

        #[ink(message)]
        pub fn max_supply(&self) -> Balance {
            MAX_SUPPLY
        }

        // -------- read API --------

        #[ink(message)]
        pub fn total_supply(&self) -> Balance {
            self.total_supply
        }

        #[ink(message)]
        pub fn balance_of(&self, owner_acc: AccountId) -> Balance {
            self.balances.get(owner_acc).unwrap_or(0)
        }

        #[ink(message)]
        pub fn allowance(&self, owner_acc: AccountId, spender_acc: AccountId) -> Balance {
            self.allowances.get((owner_acc, spender_acc)).unwrap_or(0)
        }

        #[ink(message)]
        pub fn owner(&self) -> AccountId {
            self.owner_acc
        }

        // -------- ledger write API --------

        #[ink(message)]
        pub fn transfer(&mut self, to_acc: AccountId, value: Balance) -> Result<()> {
            let from_acc = self.env().caller();
            self.check_transfer(from_acc, to_acc, value)?;
            self.move_balance(from_acc, to_acc, value)
        }

        /// Overwrites the allowance. Changing a nonzero allowance to another nonzero
        /// value lets the spender race the update and spend both; lower it through
        /// `decrease_allowance` (or to zero first) when that matters.
        #[ink(message)]
        pub fn approve(&mut self, spender_acc: AccountId, value: Balance) -> Result<()> {
            let owner_acc = self.env().caller();
            if spender_acc == zero_address() {
                return self.reject(Error::ZeroAddressApprove)
            }
            self.set_allowance(owner_acc, spender_acc, value);
            Ok(())
        }

        #[ink(message)]
        pub fn transfer_from(
            &mut self,
            from_acc: AccountId,
            to_acc: AccountId,
            value: Balance,
        ) -> Result<()> {
            // Balance is checked before allowance; nothing is written until both pass.
            self.check_transfer(from_acc, to_acc, value)?;

            let spender_acc = self.env().caller();
            let current_allow = self.allowance(from_acc, spender_acc);
            if current_allow < value {
                return self.reject(Error::InsufficientAllowance)
            }
            let new_allow = current_allow
                .checked_sub(value)
                .ok_or(Error::InsufficientAllowance)?;

            self.move_balance(from_acc, to_acc, value)?;
            self.set_allowance(from_acc, spender_acc, new_allow);
            Ok(())
        }

        #[ink(message)]
        pub fn increase_allowance(&mut self, spender_acc: AccountId, added_val: Balance) -> Result<()> {
            let owner_acc = self.env().caller();
            if spender_acc == zero_address() {
                return self.reject(Error::ZeroAddressApprove)
            }
            let current_val = self.allowance(owner_acc, spender_acc);
            let new_val = match current_val.checked_add(added_val) {
                Some(v) => v,
                None => return self.reject(Error::Overflow),
            };
            self.set_allowance(owner_acc, spender_acc, new_val);
            Ok(())
        }

        #[ink(message)]
        pub fn decrease_allowance(&mut self, spender_acc: AccountId, subtracted_val: Balance) -> Result<()> {
            let owner_acc = self.env().caller();
            if spender_acc == zero_address() {
                return self.reject(Error::ZeroAddressApprove)
            }
            let current_val = self.allowance(owner_acc, spender_acc);
            let new_val = match current_val.checked_sub(subtracted_val) {
                Some(v) => v,
                None => return self.reject(Error::AllowanceUnderflow),
            };
            self.set_allowance(owner_acc, spender_acc, new_val);
            Ok(())
        }

        // -------- ownership --------

        #[ink(message)]
        pub fn transfer_ownership(&mut self, new_owner: AccountId) -> Result<()> {
            self.only_owner()?;
            if new_owner == zero_address() {
                return self.reject(Error::ZeroAddressOwner)
            }
            self.set_owner(new_owner);
            Ok(())
        }

        #[ink(message)]
        pub fn renounce_ownership(&mut self) -> Result<()> {
            self.only_owner()?;
            self.set_owner(zero_address());
            Ok(())
        }

        // ---- internals ----

        /// Preconditions shared by `transfer` and `transfer_from`, in revert order.
        fn check_transfer(&self, from_acc: AccountId, to_acc: AccountId, value: Balance) -> Result<()> {
            if from_acc == zero_address() {
                return self.reject(Error::ZeroAddressSender)
            }
            if to_acc == zero_address() {
                return self.reject(Error::ZeroAddressRecipient)
            }
            if self.balance_of(from_acc) < value {
                return self.reject(Error::InsufficientBalance)
            }
            Ok(())
        }

        fn move_balance(&mut self, from_acc: AccountId, to_acc: AccountId, value: Balance) -> Result<()> {
            let from_bal = self.balance_of(from_acc);
            let new_from = from_bal.checked_sub(value).ok_or(Error::InsufficientBalance)?;
            self.balances.insert(from_acc, &new_from);

            // re-read so a self-transfer nets to zero
            let to_bal = self.balance_of(to_acc);
            let new_to = to_bal.checked_add(value).ok_or(Error::Overflow)?;
            self.balances.insert(to_acc, &new_to);

            self.env().emit_event(Transfer { from: from_acc, to: to_acc, value });
            Ok(())
        }

        fn set_allowance(&mut self, owner_acc: AccountId, spender_acc: AccountId, value: Balance) {
            self.allowances.insert((owner_acc, spender_acc), &value);
            self.env().emit_event(Approval { owner: owner_acc, spender: spender_acc, value });
        }

        fn set_owner(&mut self, new_owner: AccountId) {
            let old_owner = self.owner_acc;
            self.owner_acc = new_owner;
            self.env().emit_event(OwnershipTransferred { old_owner, new_owner });
        }
    }


    #[cfg(all(test, feature = "e2e-tests"))]
    mod e2e_tests {
        use super::*;
        use ink_e2e::ContractsBackend;

        type E2EResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

        #[ink_e2e::test]
        async fn e2e_deploy_and_transfer<Client: E2EBackend>(mut client: Client) -> E2EResult<()> {
            let alice = ink_e2e::account_id(ink_e2e::AccountKeyring::Alice);
            let bob = ink_e2e::account_id(ink_e2e::AccountKeyring::Bob);

            let mut constructor = WwxTokenRef::new(alice);
            let contract = client
                .instantiate("wwx", &ink_e2e::alice(), &mut constructor)
                .submit()
                .await
                .expect("instantiate failed");
            let mut call_builder = contract.call_builder::<WwxToken>();

            let total_supply = call_builder.total_supply();
            let res = client.call(&ink_e2e::alice(), &total_supply).dry_run().await?;
            assert_eq!(res.return_value(), MAX_SUPPLY);

            let transfer = call_builder.transfer(bob, 1000);
            client
                .call(&ink_e2e::alice(), &transfer)
                .submit()
                .await
                .expect("transfer failed");

            let balance_of = call_builder.balance_of(bob);
            let res = client.call(&ink_e2e::alice(), &balance_of).dry_run().await?;
            assert_eq!(res.return_value(), 1000);

            let balance_of = call_builder.balance_of(alice);
            let res = client.call(&ink_e2e::alice(), &balance_of).dry_run().await?;
            assert_eq!(res.return_value(), MAX_SUPPLY - 1000);
            Ok(())
        }

        #[ink_e2e::test]
        async fn e2e_non_owner_cannot_transfer_ownership<Client: E2EBackend>(
            mut client: Client,
        ) -> E2EResult<()> {
            let alice = ink_e2e::account_id(ink_e2e::AccountKeyring::Alice);
            let charlie = ink_e2e::account_id(ink_e2e::AccountKeyring::Charlie);

            let mut constructor = WwxTokenRef::new(alice);
            let contract = client
                .instantiate("wwx", &ink_e2e::alice(), &mut constructor)
                .submit()
                .await
                .expect("instantiate failed");
            let mut call_builder = contract.call_builder::<WwxToken>();

            let transfer_ownership = call_builder.transfer_ownership(charlie);
            let res = client.call(&ink_e2e::bob(), &transfer_ownership).dry_run().await?;
            assert_eq!(res.return_value(), Err(Error::NotOwner));

            let owner = call_builder.owner();
            let res = client.call(&ink_e2e::bob(), &owner).dry_run().await?;
            assert_eq!(res.return_value(), alice);
            Ok(())
        }
    }
}

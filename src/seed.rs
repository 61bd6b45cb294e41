use crate::error::AppError;
use crate::models::location::LocationCode;
use crate::models::profile::Gender;
use crate::service::{AdminHandle, TaxiService};

const LOCATIONS: [(&str, u32); 8] = [
    ("A", 0),
    ("C", 4),
    ("D", 7),
    ("F", 9),
    ("B", 15),
    ("G", 18),
    ("H", 20),
    ("E", 23),
];

const DRIVERS: [(&str, u8, Gender, &str, &str); 4] = [
    ("aaa", 43, Gender::Male, "111", "D"),
    ("bbb", 31, Gender::Male, "222", "G"),
    ("ccc", 38, Gender::Female, "333", "H"),
    ("ddd", 28, Gender::Female, "444", "A"),
];

const CUSTOMERS: [(&str, u8, Gender, &str); 4] = [
    ("zz", 25, Gender::Female, "99"),
    ("yy", 61, Gender::Male, "88"),
    ("xx", 22, Gender::Male, "77"),
    ("ww", 36, Gender::Female, "66"),
];

/// Loads the stock city map, cab fleet and customer list.
pub fn load_demo_data(service: &TaxiService, admin: &AdminHandle) -> Result<(), AppError> {
    for (code, distance) in LOCATIONS {
        service.admin_add_location(admin, LocationCode::parse(code)?, distance)?;
    }

    for (name, age, gender, password, location) in DRIVERS {
        service.admin_add_driver(
            admin,
            name,
            age,
            gender,
            password,
            &LocationCode::parse(location)?,
        )?;
    }

    for (name, age, gender, password) in CUSTOMERS {
        service.sign_up_customer(name, age, gender, password)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::load_demo_data;
    use crate::config::Config;
    use crate::models::customer::CustomerId;
    use crate::models::driver::DriverId;
    use crate::models::location::LocationCode;
    use crate::models::profile::Gender;
    use crate::service::TaxiService;

    #[test]
    fn demo_accounts_get_ids_from_one_and_next_signup_gets_five() {
        let service = TaxiService::new(&Config::default());
        let admin = service.authenticate_admin("zulu").unwrap();
        load_demo_data(&service, &admin).unwrap();

        assert_eq!(service.location_count().unwrap(), 8);
        assert!(service.authenticate_driver(DriverId(4), "444").is_ok());
        assert!(service.authenticate_customer(CustomerId(1), "99").is_ok());
        assert_eq!(
            service.sign_up_customer("vv", 30, Gender::Male, "55").unwrap(),
            CustomerId(5)
        );
    }

    #[test]
    fn demo_ride_from_a_to_c_is_served_by_the_cab_at_a() {
        let service = TaxiService::new(&Config::default());
        let admin = service.authenticate_admin("zulu").unwrap();
        load_demo_data(&service, &admin).unwrap();
        let customer = service.authenticate_customer(CustomerId(1), "99").unwrap();

        let assignment = service
            .request_ride(
                &customer,
                &LocationCode::parse("A").unwrap(),
                &LocationCode::parse("C").unwrap(),
            )
            .unwrap();

        assert_eq!(assignment.fare, 40);
        assert_eq!(assignment.driver.id, DriverId(4));
        assert_eq!(assignment.driver.profile.name, "ddd");
    }
}
